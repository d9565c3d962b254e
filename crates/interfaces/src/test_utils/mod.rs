//! Testing support for the peer, resolver and chain-view interfaces.

/// Random header generators.
pub mod generators;

mod peers;
pub use peers::{TestAncestorResolver, TestChainInfo, TestPeers};
