#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Sync target coordination.
//!
//! While syncing, the node follows a single remote peer, the sync target,
//! as the authority for extending its view of the chain. The
//! [SyncTargetManager] selects that peer through a mode-specific
//! [strategy](crate::strategy::SyncTargetStrategy), agrees on a common
//! ancestor with it, installs the pair into the shared [SyncState], watches
//! the peer for disconnects and re-selects under failure. Absence of peers
//! is an expected steady state, not an error; every failure path routes back
//! into a bounded retry.

mod manager;
mod state;

/// Mode-specific selection policies.
pub mod strategy;

pub use manager::{SyncTargetManager, DEFAULT_PEER_WAIT_TIMEOUT};
pub use state::{SyncState, SyncTarget};
pub use strategy::SyncTargetStrategy;
