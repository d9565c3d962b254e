//! BFT-specific header payload and rules.
//!
//! BFT chains commit their consensus payload, validator set, round and
//! commit seals, into the header's extra-data field. The payload is RLP and
//! opens with a fixed-length vanity segment; the structural rules here guard
//! that layout before any signature is checked.

mod extra;
mod rules;

pub use extra::{BftExtraData, EXTRA_VANITY_LEN};
pub use rules::VanityDataRule;
