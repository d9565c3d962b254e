use alloy_primitives::B512;

/// Alias for a peer identifier.
///
/// The uncompressed public key of the remote node, as exchanged during the
/// handshake. Opaque to this workspace; only used for identity and logging.
pub type PeerId = B512;
