use crate::{state::SyncTarget, strategy::SyncTargetStrategy};
use async_trait::async_trait;
use lodestone_interfaces::{
    p2p::{peer::PeerHandle, peers::PeersProvider},
    provider::ChainInfoProvider,
};
use tracing::trace;

/// Target selection for full sync: follow whichever peer claims the heaviest
/// chain.
///
/// Candidates must claim a chain strictly ahead of the local one and are
/// scored by claimed total difficulty, with estimated height as the
/// tiebreak. Full sync tracks the chain head indefinitely, so
/// [should_continue_downloading](SyncTargetStrategy::should_continue_downloading)
/// never signals completion.
#[derive(Debug)]
pub struct FullSyncTargetStrategy<P, C> {
    peers: P,
    chain: C,
}

// === impl FullSyncTargetStrategy ===

impl<P, C> FullSyncTargetStrategy<P, C>
where
    P: PeersProvider,
    C: ChainInfoProvider,
{
    /// Create a full-sync strategy over the given peer set and local chain
    /// view.
    pub fn new(peers: P, chain: C) -> Self {
        Self { peers, chain }
    }

    /// The best connected candidate claiming a chain ahead of the local one.
    fn best_candidate(&self) -> Option<PeerHandle> {
        let local = self.chain.chain_info();
        self.peers
            .connected_peers()
            .into_iter()
            .filter(|peer| {
                let state = peer.chain_state();
                state.total_difficulty > local.total_difficulty ||
                    state.estimated_height > local.best_number
            })
            .max_by_key(|peer| {
                let state = peer.chain_state();
                (state.total_difficulty, state.estimated_height)
            })
    }
}

#[async_trait]
impl<P, C> SyncTargetStrategy for FullSyncTargetStrategy<P, C>
where
    P: PeersProvider,
    C: ChainInfoProvider,
{
    async fn select_best_available_sync_target(&self) -> Option<PeerHandle> {
        let candidate = self.best_candidate();
        if candidate.is_none() {
            trace!(target: "sync::strategy", "No peer claims a chain ahead of the local one");
        }
        candidate
    }

    fn should_switch_sync_target(&self, current: &SyncTarget) -> bool {
        let current_td = current.peer().chain_state().total_difficulty;
        match self.best_candidate() {
            Some(best) => {
                best != *current.peer() && best.chain_state().total_difficulty > current_td
            }
            None => false,
        }
    }

    fn should_continue_downloading(&self) -> bool {
        // Full sync follows the chain head indefinitely.
        true
    }
}
