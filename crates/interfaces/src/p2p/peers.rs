use crate::p2p::peer::PeerHandle;
use lodestone_primitives::PeerId;
use std::fmt::Debug;
use tokio::sync::broadcast;

/// Provides access to the set of currently connected peers.
///
/// Implemented by the network layer, consumed by sync components that score
/// and follow peers.
#[auto_impl::auto_impl(&, Arc)]
pub trait PeersProvider: Send + Sync + Debug {
    /// Returns how many peers the network is currently connected to.
    fn num_connected_peers(&self) -> usize;

    /// Snapshot of all currently connected peers.
    fn connected_peers(&self) -> Vec<PeerHandle>;

    /// Subscribe to newly connected peers.
    ///
    /// Events lag if not consumed fast enough; a lagged receiver has only
    /// missed connects and can simply re-read the peer set. A closed channel
    /// means the provider is gone and no further event will arrive, so
    /// subscribers waiting for a wakeup must back off instead of polling the
    /// dead channel.
    fn subscribe_connected(&self) -> broadcast::Receiver<PeerId>;
}
