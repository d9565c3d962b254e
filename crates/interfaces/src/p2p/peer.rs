use lodestone_primitives::{BlockHash, PeerId, U256};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};
use tracing::trace;

/// The chain a peer claims to have, per its latest announcements.
///
/// Claims are unauthenticated hints used for peer scoring; they are never
/// trusted as actual chain state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainState {
    /// Hash of the peer's best known block.
    pub best_hash: BlockHash,
    /// Height the peer is estimated to be at.
    pub estimated_height: u64,
    /// Total difficulty the peer claims for its chain.
    pub total_difficulty: U256,
}

/// Callback invoked when a peer disconnects.
type DisconnectCallback = Arc<dyn Fn(PeerId) + Send + Sync>;

/// Identifies one registered disconnect listener on a [`PeerHandle`].
///
/// The id is the only way to remove the listener again, so the subscriber
/// must retain it. Ids are never reused by the issuing handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Handle to a connected peer, shared between the network layer and sync
/// components.
///
/// The handle does not own the peer's session; it mirrors the peer's claimed
/// chain state and fans out disconnect notifications. Dropping a handle has
/// no effect on the connection.
#[derive(Clone)]
pub struct PeerHandle {
    inner: Arc<PeerInner>,
}

struct PeerInner {
    id: PeerId,
    chain_state: RwLock<ChainState>,
    disconnected: AtomicBool,
    next_subscription_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, DisconnectCallback>>,
}

// === impl PeerHandle ===

impl PeerHandle {
    /// Create a handle for a connected peer with its initially announced
    /// chain state.
    pub fn new(id: PeerId, chain_state: ChainState) -> Self {
        Self {
            inner: Arc::new(PeerInner {
                id,
                chain_state: RwLock::new(chain_state),
                disconnected: AtomicBool::new(false),
                next_subscription_id: AtomicU64::new(0),
                subscribers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The peer's network id.
    pub fn id(&self) -> PeerId {
        self.inner.id
    }

    /// The chain this peer currently claims.
    pub fn chain_state(&self) -> ChainState {
        *self.inner.chain_state.read()
    }

    /// Replace the peer's claimed chain state with a newer announcement.
    pub fn update_chain_state(&self, state: ChainState) {
        *self.inner.chain_state.write() = state;
    }

    /// Whether the peer's session has ended.
    pub fn is_disconnected(&self) -> bool {
        self.inner.disconnected.load(Ordering::SeqCst)
    }

    /// Register a callback to run when this peer disconnects.
    ///
    /// If the peer is already disconnected the callback is invoked
    /// immediately, so a subscriber racing the session teardown never misses
    /// the event; delivery is at least once. The returned id must be kept to
    /// unsubscribe.
    pub fn subscribe_disconnect(
        &self,
        callback: impl Fn(PeerId) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.inner.next_subscription_id.fetch_add(1, Ordering::Relaxed);
        let callback: DisconnectCallback = Arc::new(callback);
        self.inner.subscribers.lock().insert(id, Arc::clone(&callback));
        if self.is_disconnected() {
            callback(self.inner.id);
        }
        SubscriptionId(id)
    }

    /// Remove a previously registered disconnect listener.
    ///
    /// Returns `false` if the id is unknown, e.g. because it was already
    /// unsubscribed.
    pub fn unsubscribe_disconnect(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.lock().remove(&id.0).is_some()
    }

    /// Number of currently registered disconnect listeners.
    pub fn disconnect_listener_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Mark the peer as disconnected and notify all listeners.
    ///
    /// Invoked by the session layer when the connection ends; only the first
    /// call dispatches. Listeners run outside the subscriber lock, so a
    /// callback may itself subscribe or unsubscribe.
    pub fn handle_disconnect(&self) {
        if self.inner.disconnected.swap(true, Ordering::SeqCst) {
            return
        }
        trace!(target: "p2p::peers", peer = %self.inner.id, "Peer disconnected");
        let subscribers: Vec<DisconnectCallback> =
            self.inner.subscribers.lock().values().cloned().collect();
        for callback in subscribers {
            callback(self.inner.id);
        }
    }
}

impl fmt::Debug for PeerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerHandle")
            .field("id", &self.inner.id)
            .field("chain_state", &self.chain_state())
            .field("disconnected", &self.is_disconnected())
            .field("subscribers", &self.disconnect_listener_count())
            .finish()
    }
}

impl PartialEq for PeerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for PeerHandle {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn peer() -> PeerHandle {
        PeerHandle::new(PeerId::random(), ChainState::default())
    }

    #[test]
    fn disconnect_notifies_subscribers_once() {
        let peer = peer();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        peer.subscribe_disconnect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        peer.handle_disconnect();
        peer.handle_disconnect();

        assert!(peer.is_disconnected());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribed_listener_is_not_invoked() {
        let peer = peer();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let id = peer.subscribe_disconnect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(peer.unsubscribe_disconnect(id));
        // Unsubscribing a second time is a clean no-op.
        assert!(!peer.unsubscribe_disconnect(id));

        peer.handle_disconnect();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(peer.disconnect_listener_count(), 0);
    }

    #[test]
    fn subscribing_after_disconnect_delivers_immediately() {
        let peer = peer();
        peer.handle_disconnect();

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        peer.subscribe_disconnect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_may_unsubscribe_without_deadlock() {
        let peer = peer();
        let other = Arc::new(Mutex::new(None::<SubscriptionId>));
        let unsubscribe_target = Arc::clone(&other);
        let handle = peer.clone();
        let id = peer.subscribe_disconnect(move |_| {
            if let Some(id) = unsubscribe_target.lock().take() {
                handle.unsubscribe_disconnect(id);
            }
        });
        *other.lock() = Some(id);

        peer.handle_disconnect();
        assert_eq!(peer.disconnect_listener_count(), 0);
    }

    #[test]
    fn subscription_ids_are_unique() {
        let peer = peer();
        let a = peer.subscribe_disconnect(|_| {});
        let b = peer.subscribe_disconnect(|_| {});
        assert_ne!(a, b);
        assert_eq!(peer.disconnect_listener_count(), 2);
    }

    #[test]
    fn chain_state_updates_replace_the_claim() {
        let peer = peer();
        let state = ChainState {
            estimated_height: 1337,
            total_difficulty: U256::from(42u64),
            ..Default::default()
        };
        peer.update_chain_state(state);
        assert_eq!(peer.chain_state(), state);
    }
}
