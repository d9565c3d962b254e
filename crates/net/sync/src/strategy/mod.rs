//! Mode-specific policy for choosing and keeping sync targets.

use crate::state::SyncTarget;
use async_trait::async_trait;
use lodestone_interfaces::p2p::peer::PeerHandle;
use std::fmt::Debug;

mod full;
mod pivot;

pub use full::FullSyncTargetStrategy;
pub use pivot::PivotSyncTargetStrategy;

/// The policy hooks a sync mode plugs into the
/// [SyncTargetManager](crate::SyncTargetManager).
///
/// The manager owns the selection/monitor/reselect cycle; strategies only
/// answer the mode-specific questions: which peer to follow, whether to
/// switch away from the current one, whether the outer sync loop should keep
/// running, and whether a freshly installed target is acceptable.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait SyncTargetStrategy: Send + Sync + Debug {
    /// The best peer to sync from right now, if any qualifies.
    async fn select_best_available_sync_target(&self) -> Option<PeerHandle>;

    /// Whether the active target should be abandoned in favor of
    /// re-selection, e.g. because a better peer appeared.
    fn should_switch_sync_target(&self, current: &SyncTarget) -> bool;

    /// Whether the sync loop driving the manager should keep running.
    fn should_continue_downloading(&self) -> bool;

    /// Mode-specific acceptance check for a freshly installed target.
    ///
    /// Runs after the target is installed but before it is handed to the
    /// caller; returning `false` makes the manager clear the target again
    /// and re-enter selection. The default accepts unconditionally.
    fn finalize_selected_sync_target(&self, _target: &SyncTarget) -> bool {
        true
    }
}
