//! Structural parent/child rules shared by all sync modes.

use crate::rules::HeaderValidationRule;
use lodestone_primitives::SealedHeader;

/// Requires `header` to be the direct descendant of `parent`.
///
/// Checks hash linkage and that the block numbers are sequential.
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestryRule;

impl<Ctx> HeaderValidationRule<Ctx> for AncestryRule {
    fn validate(&self, header: &SealedHeader, parent: &SealedHeader, _ctx: &Ctx) -> bool {
        parent.hash() == header.parent_hash && parent.number + 1 == header.number
    }
}

/// Requires the header's timestamp to move strictly forward from its parent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampRule;

impl<Ctx> HeaderValidationRule<Ctx> for TimestampRule {
    fn validate(&self, header: &SealedHeader, parent: &SealedHeader, _ctx: &Ctx) -> bool {
        !header.is_timestamp_in_past(parent.timestamp)
    }
}

/// Caps a block's gas consumption at its declared gas limit.
///
/// Gas used is checked again after execution; this rule only rejects headers
/// that are inconsistent on their face.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasUsageRule;

impl<Ctx> HeaderValidationRule<Ctx> for GasUsageRule {
    fn validate(&self, header: &SealedHeader, _parent: &SealedHeader, _ctx: &Ctx) -> bool {
        header.gas_used <= header.gas_limit
    }
}

/// Bounds how far a block's gas limit may drift from its parent's.
///
/// The limit may move by strictly less than 1/1024th of the parent's limit
/// in either direction. The drift bound is the rule's only constraint;
/// there is no absolute minimum limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasLimitRule;

impl<Ctx> HeaderValidationRule<Ctx> for GasLimitRule {
    fn validate(&self, header: &SealedHeader, parent: &SealedHeader, _ctx: &Ctx) -> bool {
        let bound = parent.gas_limit / 1024;
        if header.gas_limit > parent.gas_limit {
            header.gas_limit - parent.gas_limit < bound
        } else {
            parent.gas_limit - header.gas_limit < bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_interfaces::test_utils::generators::{child_header, random_header};

    #[test]
    fn ancestry_accepts_direct_child() {
        let parent = random_header(10, None);
        let child = child_header(&parent);
        assert!(AncestryRule.validate(&child, &parent, &()));
    }

    #[test]
    fn ancestry_rejects_number_gap_and_hash_mismatch() {
        let parent = random_header(10, None);

        let mut skipped = child_header(&parent).unseal();
        skipped.number += 1;
        assert!(!AncestryRule.validate(&skipped.seal_slow(), &parent, &()));

        let unrelated = random_header(11, None);
        assert!(!AncestryRule.validate(&unrelated, &parent, &()));
    }

    #[test]
    fn timestamp_must_strictly_increase() {
        let parent = random_header(10, None);
        let child = child_header(&parent);
        assert!(TimestampRule.validate(&child, &parent, &()));

        let mut stalled = child.unseal();
        stalled.timestamp = parent.timestamp;
        assert!(!TimestampRule.validate(&stalled.seal_slow(), &parent, &()));
    }

    #[test]
    fn gas_usage_cannot_exceed_limit() {
        let parent = random_header(10, None);
        let mut child = child_header(&parent).unseal();
        child.gas_limit = 1_000_000;

        child.gas_used = 1_000_000;
        assert!(GasUsageRule.validate(&child.clone().seal_slow(), &parent, &()));

        child.gas_used = 1_000_001;
        assert!(!GasUsageRule.validate(&child.seal_slow(), &parent, &()));
    }

    #[test]
    fn gas_limit_drift_is_bounded() {
        let mut parent = random_header(10, None).unseal();
        parent.gas_limit = 1_024_000;
        let parent = parent.seal_slow();
        // Drift bound is parent.gas_limit / 1024.
        let bound = 1_000;

        let mut child = child_header(&parent).unseal();
        child.gas_limit = parent.gas_limit + bound - 1;
        assert!(GasLimitRule.validate(&child.clone().seal_slow(), &parent, &()));

        child.gas_limit = parent.gas_limit + bound;
        assert!(!GasLimitRule.validate(&child.clone().seal_slow(), &parent, &()));

        child.gas_limit = parent.gas_limit - bound;
        assert!(!GasLimitRule.validate(&child.seal_slow(), &parent, &()));
    }

    #[test]
    fn gas_limit_is_bounded_by_drift_alone() {
        // Small limits are admissible; only the drift against the parent
        // is constrained.
        let mut parent = random_header(10, None).unseal();
        parent.gas_limit = 4_000;
        let parent = parent.seal_slow();

        let mut child = child_header(&parent).unseal();
        child.gas_limit = 4_001;
        assert!(GasLimitRule.validate(&child.clone().seal_slow(), &parent, &()));

        // Drift bound is 4_000 / 1024 = 3.
        child.gas_limit = 4_003;
        assert!(!GasLimitRule.validate(&child.seal_slow(), &parent, &()));
    }
}
