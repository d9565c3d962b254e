//! Testing support for peer and resolver interfaces.
use crate::{
    p2p::{
        ancestor::CommonAncestorResolver,
        error::{RequestError, RequestResult},
        peer::{ChainState, PeerHandle},
        peers::PeersProvider,
    },
    provider::ChainInfoProvider,
};
use lodestone_primitives::{ChainInfo, PeerId, SealedHeader, U256};
use parking_lot::Mutex;
use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};
use tokio::sync::broadcast;

/// An in-memory peer set for tests.
///
/// Peers are connected and disconnected manually; connect events are
/// broadcast to subscribers the way the network layer would.
#[derive(Debug)]
pub struct TestPeers {
    peers: Mutex<Vec<PeerHandle>>,
    connect_tx: broadcast::Sender<PeerId>,
}

impl Default for TestPeers {
    fn default() -> Self {
        let (connect_tx, _) = broadcast::channel(16);
        Self { peers: Mutex::new(Vec::new()), connect_tx }
    }
}

// === impl TestPeers ===

impl TestPeers {
    /// Add a connected peer and announce it to subscribers.
    pub fn connect(&self, peer: PeerHandle) {
        self.peers.lock().push(peer.clone());
        // Nobody may be listening yet.
        let _ = self.connect_tx.send(peer.id());
    }

    /// Create, connect and return a peer with the given chain claim.
    pub fn connect_new(&self, estimated_height: u64, total_difficulty: U256) -> PeerHandle {
        let peer = PeerHandle::new(
            PeerId::random(),
            ChainState { estimated_height, total_difficulty, ..Default::default() },
        );
        self.connect(peer.clone());
        peer
    }

    /// Drop the peer from the set and end its session.
    pub fn disconnect(&self, peer: &PeerHandle) {
        self.peers.lock().retain(|p| p.id() != peer.id());
        peer.handle_disconnect();
    }
}

impl PeersProvider for TestPeers {
    fn num_connected_peers(&self) -> usize {
        self.peers.lock().len()
    }

    fn connected_peers(&self) -> Vec<PeerHandle> {
        self.peers.lock().clone()
    }

    fn subscribe_connected(&self) -> broadcast::Receiver<PeerId> {
        self.connect_tx.subscribe()
    }
}

/// A scripted [CommonAncestorResolver] that returns queued results in order.
///
/// An exhausted queue yields `Ok(None)`, i.e. no common ancestor.
#[derive(Debug, Default)]
pub struct TestAncestorResolver {
    responses: Mutex<VecDeque<RequestResult<Option<SealedHeader>>>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

// === impl TestAncestorResolver ===

impl TestAncestorResolver {
    /// Queue a successful resolution.
    pub fn queue_ancestor(&self, header: SealedHeader) {
        self.responses.lock().push_back(Ok(Some(header)));
    }

    /// Queue a "no common ancestor" outcome.
    pub fn queue_none(&self) {
        self.responses.lock().push_back(Ok(None));
    }

    /// Queue a failed resolution.
    pub fn queue_error(&self, error: RequestError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Delay every response, simulating network round trips.
    pub fn set_response_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// How many resolutions have been requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CommonAncestorResolver for TestAncestorResolver {
    async fn determine_common_ancestor(
        &self,
        _peer: &PeerHandle,
    ) -> RequestResult<Option<SealedHeader>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses.lock().pop_front().unwrap_or(Ok(None))
    }
}

/// A settable local chain view.
#[derive(Debug, Default)]
pub struct TestChainInfo {
    info: Mutex<ChainInfo>,
}

// === impl TestChainInfo ===

impl TestChainInfo {
    /// Set the local best block.
    pub fn set_best(&self, best_number: u64, total_difficulty: U256) {
        let mut info = self.info.lock();
        info.best_number = best_number;
        info.total_difficulty = total_difficulty;
    }
}

impl ChainInfoProvider for TestChainInfo {
    fn chain_info(&self) -> ChainInfo {
        *self.info.lock()
    }
}
