#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Commonly used types in lodestone.
//!
//! This crate contains the chain primitive types shared by the sync and
//! consensus layers: block headers and their sealed form, the local chain
//! view and peer identifiers.

mod chain;
mod header;
mod peer;

pub use chain::ChainInfo;
pub use header::{Header, SealedHeader};
pub use peer::PeerId;

pub use alloy_primitives::{self, keccak256, Address, Bytes, B256, B512, U256};

/// A block number.
pub type BlockNumber = u64;

/// A block hash.
pub type BlockHash = B256;
