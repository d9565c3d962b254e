#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Lodestone interface bindings

/// P2P traits.
pub mod p2p;

/// Provider trait for the local chain view.
pub mod provider;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers for mocking out peers, ancestor resolvers and chain views.
pub mod test_utils;
