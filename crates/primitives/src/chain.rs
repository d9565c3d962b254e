use crate::{BlockHash, BlockNumber};
use alloy_primitives::U256;

/// Current status of the blockchain's head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainInfo {
    /// The block hash of the highest fully synced block.
    pub best_hash: BlockHash,
    /// The block number of the highest fully synced block.
    pub best_number: BlockNumber,
    /// The total difficulty accumulated up to and including the best block.
    pub total_difficulty: U256,
}
