use crate::{
    bft::extra::{BftExtraData, EXTRA_VANITY_LEN},
    rules::HeaderValidationRule,
};
use lodestone_primitives::SealedHeader;
use tracing::{debug, trace};

/// Rejects headers whose extra-data vanity segment is not exactly
/// [EXTRA_VANITY_LEN] bytes.
///
/// Purely structural: it catches malformed or truncated extra-data before
/// the rest of the BFT payload is trusted, and verifies no signature.
/// Headers whose extra-data does not decode at all are rejected the same
/// way; decoding problems never escape the rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanityDataRule;

impl<Ctx> HeaderValidationRule<Ctx> for VanityDataRule {
    fn validate(&self, header: &SealedHeader, _parent: &SealedHeader, _ctx: &Ctx) -> bool {
        let extra = match BftExtraData::decode(&header.extra_data) {
            Ok(extra) => extra,
            Err(error) => {
                debug!(
                    target: "consensus::bft",
                    %error,
                    hash = ?header.hash(),
                    "Failed to decode extra data"
                );
                return false
            }
        };
        if extra.vanity_data.len() != EXTRA_VANITY_LEN {
            trace!(
                target: "consensus::bft",
                len = extra.vanity_data.len(),
                expected = EXTRA_VANITY_LEN,
                "Extra data vanity segment has the wrong length"
            );
            return false
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{AncestryRule, HeaderRuleSet, TimestampRule};
    use lodestone_interfaces::test_utils::generators::{child_header, random_header};
    use lodestone_primitives::{Bytes, Header, SealedHeader};

    fn bft_header(vanity_len: usize) -> SealedHeader {
        let extra = BftExtraData {
            vanity_data: Bytes::from(vec![0xab; vanity_len]),
            round: 1,
            ..Default::default()
        };
        Header { number: 1, extra_data: extra.encoded(), ..Default::default() }.seal_slow()
    }

    #[test]
    fn exact_vanity_length_passes() {
        let parent = SealedHeader::default();
        assert!(VanityDataRule.validate(&bft_header(32), &parent, &()));
    }

    #[test]
    fn off_by_one_vanity_lengths_fail() {
        let parent = SealedHeader::default();
        assert!(!VanityDataRule.validate(&bft_header(31), &parent, &()));
        assert!(!VanityDataRule.validate(&bft_header(33), &parent, &()));
    }

    #[test]
    fn undecodable_extra_data_fails_without_panic() {
        let parent = SealedHeader::default();

        let garbage = Header {
            extra_data: Bytes::from_static(&[0xff, 0x01, 0x02]),
            ..Default::default()
        }
        .seal_slow();
        assert!(!VanityDataRule.validate(&garbage, &parent, &()));

        let empty = Header::default().seal_slow();
        assert!(!VanityDataRule.validate(&empty, &parent, &()));
    }

    #[test]
    fn composes_with_structural_rules() {
        let mut parent = random_header(10, None).unseal();
        parent.extra_data = BftExtraData {
            vanity_data: Bytes::from(vec![0u8; EXTRA_VANITY_LEN]),
            ..Default::default()
        }
        .encoded();
        let parent = parent.seal_slow();

        let mut child = child_header(&parent).unseal();
        child.extra_data = parent.extra_data.clone();
        let child = child.seal_slow();

        let rules = HeaderRuleSet::new()
            .with_rule(AncestryRule)
            .with_rule(TimestampRule)
            .with_rule(VanityDataRule);
        assert!(rules.evaluate(&child, &parent, &()));

        // An unrelated header trips ancestry before the vanity rule runs.
        let unrelated = bft_header(32);
        assert!(!rules.evaluate(&unrelated, &parent, &()));
    }
}
