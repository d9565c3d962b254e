#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Consensus-level header validation for lodestone.
//!
//! Validation is expressed as ordered sets of small, pure rules. Each rule is
//! a necessary condition on a candidate header; a rule set evaluates them in
//! order and rejects on the first failure. Rules never mutate their inputs
//! and never panic on malformed data.

/// BFT extra-data payload and its structural rules.
pub mod bft;

/// The rule trait, rule sets and the standard structural rules.
pub mod rules;

pub use rules::{HeaderRuleSet, HeaderValidationRule};
