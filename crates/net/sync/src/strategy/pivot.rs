use crate::{state::SyncTarget, strategy::SyncTargetStrategy};
use async_trait::async_trait;
use lodestone_interfaces::{
    p2p::{peer::PeerHandle, peers::PeersProvider},
    provider::ChainInfoProvider,
};
use lodestone_primitives::SealedHeader;
use tracing::{debug, trace};

/// Target selection that downloads towards a fixed pivot header.
///
/// Used by snapshot-style sync modes that first fetch state at a chosen
/// pivot block. Only peers claiming to know the pivot's height qualify as
/// candidates, and downloading stops once the local chain reaches the pivot.
#[derive(Debug)]
pub struct PivotSyncTargetStrategy<P, C> {
    peers: P,
    chain: C,
    pivot: SealedHeader,
}

// === impl PivotSyncTargetStrategy ===

impl<P, C> PivotSyncTargetStrategy<P, C>
where
    P: PeersProvider,
    C: ChainInfoProvider,
{
    /// Create a pivot-sync strategy for the given pivot header.
    pub fn new(peers: P, chain: C, pivot: SealedHeader) -> Self {
        Self { peers, chain, pivot }
    }

    /// The header sync is pivoting on.
    pub fn pivot(&self) -> &SealedHeader {
        &self.pivot
    }

    /// The heaviest connected peer claiming to know the pivot's height.
    fn qualified_candidate(&self) -> Option<PeerHandle> {
        self.peers
            .connected_peers()
            .into_iter()
            .filter(|peer| peer.chain_state().estimated_height >= self.pivot.number)
            .max_by_key(|peer| {
                let state = peer.chain_state();
                (state.total_difficulty, state.estimated_height)
            })
    }
}

#[async_trait]
impl<P, C> SyncTargetStrategy for PivotSyncTargetStrategy<P, C>
where
    P: PeersProvider,
    C: ChainInfoProvider,
{
    async fn select_best_available_sync_target(&self) -> Option<PeerHandle> {
        let candidate = self.qualified_candidate();
        if candidate.is_none() {
            trace!(
                target: "sync::strategy",
                pivot = self.pivot.number,
                "No peer claims to know the pivot block"
            );
        }
        candidate
    }

    fn should_switch_sync_target(&self, current: &SyncTarget) -> bool {
        // A peer whose claim regressed below the pivot is no longer useful.
        current.peer().chain_state().estimated_height < self.pivot.number
    }

    fn should_continue_downloading(&self) -> bool {
        self.chain.chain_info().best_number < self.pivot.number
    }

    fn finalize_selected_sync_target(&self, target: &SyncTarget) -> bool {
        // Height claims can change between selection and installation.
        let height = target.peer().chain_state().estimated_height;
        if height < self.pivot.number {
            debug!(
                target: "sync::strategy",
                peer = %target.peer().id(),
                height,
                pivot = self.pivot.number,
                "Sync target claim fell below the pivot"
            );
            return false
        }
        true
    }
}
