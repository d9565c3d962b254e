use crate::p2p::{error::RequestResult, peer::PeerHandle};
use async_trait::async_trait;
use lodestone_primitives::SealedHeader;
use std::fmt::Debug;

/// Locates the highest header the local chain shares with a remote peer.
///
/// The search itself, typically a binary search over the peer's chain, is an
/// implementation detail of the network layer. Implementations carry their
/// own per-request timeout and retry policy; callers only distinguish
/// success, "nothing in common" and failure.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait CommonAncestorResolver: Send + Sync + Debug {
    /// Determine the common ancestor between the local chain and `peer`.
    ///
    /// Returns `Ok(None)` when the chains share no useful ancestor, e.g. the
    /// peer has nothing the local chain does not already know.
    async fn determine_common_ancestor(
        &self,
        peer: &PeerHandle,
    ) -> RequestResult<Option<SealedHeader>>;
}
