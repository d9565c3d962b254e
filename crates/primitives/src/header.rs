use crate::{BlockHash, BlockNumber};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use std::ops::Deref;

/// Block header.
///
/// The fields a BFT chain commits to. Proof-of-work remnants (nonce, mix
/// hash, ommers) are not part of this chain's header; consensus-specific
/// payload travels in `extra_data`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// The Keccak 256-bit hash of the parent block's header, in its entirety.
    pub parent_hash: B256,
    /// The address of the validator that proposed this block.
    pub beneficiary: Address,
    /// The Keccak 256-bit hash of the root node of the state trie, after all
    /// transactions are executed and finalisations applied.
    pub state_root: B256,
    /// A scalar value corresponding to the difficulty level of this block.
    pub difficulty: U256,
    /// A scalar value equal to the number of ancestor blocks. The genesis
    /// block has a number of zero.
    pub number: BlockNumber,
    /// A scalar value equal to the current limit of gas expenditure per block.
    pub gas_limit: u64,
    /// A scalar value equal to the total gas used in transactions in this block.
    pub gas_used: u64,
    /// A scalar value equal to the reasonable output of Unix's time() at this
    /// block's inception.
    pub timestamp: u64,
    /// An arbitrary byte array containing data relevant to this block. On BFT
    /// chains this carries the consensus payload and is interpreted by
    /// validation rules.
    pub extra_data: Bytes,
}

// === impl Header ===

impl Header {
    /// Heavy function that will calculate hash of data and will *not* save the state.
    ///
    /// Use [`Header::seal_slow`] if you need the hash more than once.
    pub fn hash_slow(&self) -> B256 {
        keccak256(alloy_rlp::encode(self))
    }

    /// Checks if the block's timestamp is in the past compared to the parent
    /// block's timestamp.
    ///
    /// Note: This check is relevant only pre-merge style chains where
    /// timestamps must strictly increase.
    pub const fn is_timestamp_in_past(&self, parent_timestamp: u64) -> bool {
        self.timestamp <= parent_timestamp
    }

    /// Seal the header with a known hash.
    ///
    /// WARNING: This method does not perform validation whether the hash is
    /// correct.
    pub const fn seal(self, hash: B256) -> SealedHeader {
        SealedHeader::new(self, hash)
    }

    /// Calculate the hash and seal the header so that it can't be changed.
    pub fn seal_slow(self) -> SealedHeader {
        let hash = self.hash_slow();
        self.seal(hash)
    }
}

/// A [`Header`] that is sealed at a precalculated hash, use
/// [`SealedHeader::unseal()`] if you want to modify the header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SealedHeader {
    /// Locked Header fields.
    header: Header,
    /// Locked Header hash.
    hash: BlockHash,
}

// === impl SealedHeader ===

impl SealedHeader {
    /// Creates the sealed header from the header and its precalculated hash.
    pub const fn new(header: Header, hash: BlockHash) -> Self {
        Self { header, hash }
    }

    /// Returns the sealed Header fields.
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns header/block hash.
    pub const fn hash(&self) -> BlockHash {
        self.hash
    }

    /// Extract raw header that can be modified.
    pub fn unseal(self) -> Header {
        self.header
    }
}

impl Default for SealedHeader {
    fn default() -> Self {
        Header::default().seal_slow()
    }
}

impl Deref for SealedHeader {
    type Target = Header;

    fn deref(&self) -> &Self::Target {
        &self.header
    }
}

impl AsRef<Header> for SealedHeader {
    fn as_ref(&self) -> &Header {
        &self.header
    }
}
