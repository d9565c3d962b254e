use alloy_rlp::{RlpDecodable, RlpEncodable};
use lodestone_primitives::{Address, Bytes};

/// Number of bytes the vanity segment of a BFT extra-data payload must hold.
pub const EXTRA_VANITY_LEN: usize = 32;

/// The BFT payload carried in a block header's extra-data field.
///
/// Wire layout is the RLP list
/// `[vanity_data, validators, round, committed_seals]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct BftExtraData {
    /// Free-form proposer-chosen bytes, fixed length by convention.
    pub vanity_data: Bytes,
    /// Addresses of the validators eligible to sign at this height.
    pub validators: Vec<Address>,
    /// Consensus round in which the block was proposed.
    pub round: u32,
    /// Commit signatures collected from the validators.
    pub committed_seals: Vec<Bytes>,
}

// === impl BftExtraData ===

impl BftExtraData {
    /// Decode the payload from raw extra-data bytes.
    pub fn decode(mut data: &[u8]) -> alloy_rlp::Result<Self> {
        <Self as alloy_rlp::Decodable>::decode(&mut data)
    }

    /// RLP-encode the payload into fresh extra-data bytes.
    pub fn encoded(&self) -> Bytes {
        alloy_rlp::encode(self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn encode_empty_payload() {
        let extra = BftExtraData { vanity_data: Bytes::from(vec![0u8; 32]), ..Default::default() };
        // [32 zero vanity bytes, [], 0, []]
        let expected = hex!("e4a00000000000000000000000000000000000000000000000000000000000000000c080c0");
        assert_eq!(extra.encoded().as_ref(), expected);
        assert_eq!(BftExtraData::decode(&expected).unwrap(), extra);
    }

    #[test]
    fn roundtrip_with_validators_and_seals() {
        let extra = BftExtraData {
            vanity_data: Bytes::from(vec![0x11; EXTRA_VANITY_LEN]),
            validators: vec![Address::repeat_byte(0x22), Address::repeat_byte(0x33)],
            round: 5,
            committed_seals: vec![Bytes::from(vec![0x44; 65]), Bytes::from(vec![0x55; 65])],
        };
        let encoded = extra.encoded();
        assert_eq!(BftExtraData::decode(&encoded).unwrap(), extra);
    }

    #[test]
    fn decode_rejects_truncated_payload() {
        let encoded = BftExtraData {
            vanity_data: Bytes::from(vec![0u8; EXTRA_VANITY_LEN]),
            ..Default::default()
        }
        .encoded();
        assert_matches!(BftExtraData::decode(&encoded[..encoded.len() - 1]), Err(_));
    }

    #[test]
    fn decode_rejects_non_list_payload() {
        assert_matches!(BftExtraData::decode(&hex!("80")), Err(_));
        assert_matches!(BftExtraData::decode(&[]), Err(_));
    }
}
