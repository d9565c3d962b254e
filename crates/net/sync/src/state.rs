use lodestone_interfaces::p2p::peer::PeerHandle;
use lodestone_primitives::SealedHeader;
use parking_lot::RwLock;

/// The peer and mutually agreed ancestor header the node is syncing against.
///
/// Constructed by the [SyncTargetManager](crate::SyncTargetManager) once a
/// candidate peer and an agreed ancestor are both known, and owned by
/// [SyncState] until cleared or replaced. The ancestor is fixed at creation
/// time; it going stale later is handled by re-selection, never by mutating
/// the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    peer: PeerHandle,
    common_ancestor: SealedHeader,
}

// === impl SyncTarget ===

impl SyncTarget {
    /// Bind a peer and the agreed common ancestor together.
    pub fn new(peer: PeerHandle, common_ancestor: SealedHeader) -> Self {
        Self { peer, common_ancestor }
    }

    /// The peer the node syncs from.
    pub fn peer(&self) -> &PeerHandle {
        &self.peer
    }

    /// The highest header the local chain shares with the peer.
    pub fn common_ancestor(&self) -> &SealedHeader {
        &self.common_ancestor
    }
}

/// Holder of the currently active [SyncTarget], if any.
///
/// Shared between the manager, the sole logical writer, and any component
/// following the sync, e.g. the downloader. Readers see either no target or
/// a fully formed one; writes swap the whole value, fields are never updated
/// in place.
#[derive(Debug, Default)]
pub struct SyncState {
    target: RwLock<Option<SyncTarget>>,
}

// === impl SyncState ===

impl SyncState {
    /// Create an empty sync state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active target, if one is installed.
    pub fn sync_target(&self) -> Option<SyncTarget> {
        self.target.read().clone()
    }

    /// Whether a target is currently installed.
    pub fn has_sync_target(&self) -> bool {
        self.target.read().is_some()
    }

    /// Install a new target, replacing any previous one, and return it.
    pub fn set_sync_target(&self, peer: PeerHandle, common_ancestor: SealedHeader) -> SyncTarget {
        let target = SyncTarget::new(peer, common_ancestor);
        *self.target.write() = Some(target.clone());
        target
    }

    /// Drop the active target.
    pub fn clear_sync_target(&self) {
        *self.target.write() = None;
    }
}
