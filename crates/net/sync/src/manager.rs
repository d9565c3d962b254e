use crate::{
    state::{SyncState, SyncTarget},
    strategy::SyncTargetStrategy,
};
use lodestone_interfaces::p2p::{
    ancestor::CommonAncestorResolver,
    peer::{PeerHandle, SubscriptionId},
    peers::PeersProvider,
};
use lodestone_primitives::SealedHeader;
use parking_lot::Mutex;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, trace};

/// How long [`SyncTargetManager`] waits for a new peer to connect before
/// retrying target selection.
pub const DEFAULT_PEER_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Coordinates which peer the chain is downloaded from.
///
/// The manager owns the shared [`SyncState`] and drives the selection loop: a
/// [`SyncTargetStrategy`] nominates the best connected peer, a
/// [`CommonAncestorResolver`] locates the fork point with that peer, and the
/// resulting [`SyncTarget`] is installed for downloaders to read.
///
/// Peer churn is handled in two phases. When the target peer disconnects only
/// a flag is raised; the installed target stays readable until the download
/// pipeline observes [`is_sync_target_disconnected`] and calls
/// [`clear_sync_target`], which tears the target down so the next search
/// starts from scratch.
///
/// [`is_sync_target_disconnected`]: Self::is_sync_target_disconnected
/// [`clear_sync_target`]: Self::clear_sync_target
#[derive(Debug)]
pub struct SyncTargetManager<P, S, R> {
    /// Access to the connected peer set.
    peers: P,
    /// Decides which peer to sync from and when to stop.
    strategy: S,
    /// Locates the fork point shared with a candidate peer.
    resolver: R,
    /// The installed target, shared with downloaders.
    sync_state: Arc<SyncState>,
    /// Raised by the disconnect listener of the current target peer.
    target_disconnected: Arc<AtomicBool>,
    /// Listener registration on the current target peer, if any.
    disconnect_listener: Mutex<Option<SubscriptionId>>,
    /// Bounded wait between selection attempts while no peer qualifies.
    peer_wait_timeout: Duration,
}

// === impl SyncTargetManager ===

impl<P, S, R> SyncTargetManager<P, S, R>
where
    P: PeersProvider,
    S: SyncTargetStrategy,
    R: CommonAncestorResolver,
{
    /// Create a manager with the [default peer wait](DEFAULT_PEER_WAIT_TIMEOUT).
    pub fn new(peers: P, strategy: S, resolver: R) -> Self {
        Self {
            peers,
            strategy,
            resolver,
            sync_state: Arc::new(SyncState::new()),
            target_disconnected: Arc::new(AtomicBool::new(false)),
            disconnect_listener: Mutex::new(None),
            peer_wait_timeout: DEFAULT_PEER_WAIT_TIMEOUT,
        }
    }

    /// Set how long to wait for a new peer between selection attempts.
    pub fn with_peer_wait_timeout(mut self, timeout: Duration) -> Self {
        self.peer_wait_timeout = timeout;
        self
    }

    /// The shared state downloaders read the installed target from.
    pub fn sync_state(&self) -> Arc<SyncState> {
        Arc::clone(&self.sync_state)
    }

    /// Returns the current sync target, searching for one if none is active.
    ///
    /// This is idempotent: while a target is installed, the same target is
    /// returned without consulting the strategy again. Otherwise the manager
    /// alternates between selection attempts and a bounded wait for new
    /// peers, resolving only once a usable peer has been found.
    pub async fn find_sync_target(&self) -> SyncTarget {
        loop {
            if let Some(target) = self.sync_state.sync_target() {
                return target
            }
            if let Some(target) = self.try_select_sync_target().await {
                return target
            }
            self.wait_for_new_peer().await;
        }
    }

    /// Whether the current target's peer has disconnected.
    ///
    /// The target itself remains installed; callers decide when to act on
    /// the flag by calling [`clear_sync_target`](Self::clear_sync_target).
    pub fn is_sync_target_disconnected(&self) -> bool {
        self.target_disconnected.load(Ordering::SeqCst)
    }

    /// Tear down the installed target.
    ///
    /// Removes the disconnect listener from the target's peer, lowers the
    /// disconnect flag and empties the shared state, after which
    /// [`find_sync_target`](Self::find_sync_target) selects from scratch.
    ///
    /// Clearing with a target that is no longer the installed one is a no-op:
    /// the listener registration belongs to the live target's peer.
    pub fn clear_sync_target(&self, target: &SyncTarget) {
        if self.sync_state.sync_target().as_ref() != Some(target) {
            trace!(
                target: "sync::target",
                peer = %target.peer().id(),
                "Ignoring clear for a stale sync target"
            );
            return
        }
        if let Some(id) = self.disconnect_listener.lock().take() {
            target.peer().unsubscribe_disconnect(id);
        }
        self.target_disconnected.store(false, Ordering::SeqCst);
        self.sync_state.clear_sync_target();
        debug!(target: "sync::target", peer = %target.peer().id(), "Cleared sync target");
    }

    /// Whether the strategy prefers a different peer over the current target.
    pub fn should_switch_sync_target(&self, current: &SyncTarget) -> bool {
        self.strategy.should_switch_sync_target(current)
    }

    /// Whether the strategy wants the download to keep going.
    pub fn should_continue_downloading(&self) -> bool {
        self.strategy.should_continue_downloading()
    }

    /// Run one selection attempt: nominate a peer, resolve the common
    /// ancestor and install the result.
    async fn try_select_sync_target(&self) -> Option<SyncTarget> {
        let peer = match self.strategy.select_best_available_sync_target().await {
            Some(peer) => peer,
            None => {
                trace!(target: "sync::target", "No sync target candidate available");
                return None
            }
        };

        let ancestor = match self.resolver.determine_common_ancestor(&peer).await {
            Ok(Some(ancestor)) => ancestor,
            Ok(None) => {
                debug!(
                    target: "sync::target",
                    peer = %peer.id(),
                    "No common ancestor with candidate peer"
                );
                return None
            }
            Err(error) => {
                // Resolver failures are transient, treat them like a missing
                // ancestor and let the next round try again.
                debug!(
                    target: "sync::target",
                    peer = %peer.id(),
                    %error,
                    "Failed to resolve common ancestor"
                );
                return None
            }
        };

        let target = self.install_sync_target(peer, ancestor);
        if self.strategy.finalize_selected_sync_target(&target) {
            return Some(target)
        }
        debug!(
            target: "sync::target",
            peer = %target.peer().id(),
            "Sync target rejected by strategy"
        );
        self.clear_sync_target(&target);
        None
    }

    /// Install the target and hook up its disconnect listener.
    ///
    /// The listener is registered before the target becomes readable; a
    /// disconnect delivered during registration still raises the flag, so
    /// the installed target is never silently orphaned.
    fn install_sync_target(&self, peer: PeerHandle, ancestor: SealedHeader) -> SyncTarget {
        let disconnected = Arc::clone(&self.target_disconnected);
        let id = peer.subscribe_disconnect(move |peer_id| {
            info!(target: "sync::target", peer = %peer_id, "Sync target peer disconnected");
            disconnected.store(true, Ordering::SeqCst);
        });
        *self.disconnect_listener.lock() = Some(id);

        let target = self.sync_state.set_sync_target(peer, ancestor);
        info!(
            target: "sync::target",
            peer = %target.peer().id(),
            number = target.common_ancestor().number,
            "Found common ancestor with sync target"
        );
        target
    }

    /// Wait for a peer to connect, bounded by the configured timeout.
    ///
    /// A connect event or a lagged receiver ends the wait early; either way
    /// the next round re-reads the peer set. A closed channel can never
    /// deliver an event, so it degrades the wait into a plain sleep that
    /// preserves the retry cadence.
    async fn wait_for_new_peer(&self) {
        let mut connected = self.peers.subscribe_connected();
        trace!(
            target: "sync::target",
            connected = self.peers.num_connected_peers(),
            timeout = ?self.peer_wait_timeout,
            "Waiting for a new peer before retrying selection"
        );
        if let Ok(Err(RecvError::Closed)) =
            tokio::time::timeout(self.peer_wait_timeout, connected.recv()).await
        {
            tokio::time::sleep(self.peer_wait_timeout).await;
        }
    }
}
