/// Traits for resolving the common ancestor with a remote peer.
pub mod ancestor;

/// Shared error types for p2p requests.
pub mod error;

/// Handles to connected peers and their disconnect notifications.
pub mod peer;

/// Access to the set of currently connected peers.
pub mod peers;
