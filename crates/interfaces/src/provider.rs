use lodestone_primitives::ChainInfo;
use std::fmt::Debug;

/// Client trait for fetching info about the local chain.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ChainInfoProvider: Send + Sync + Debug {
    /// Returns the current info for the canonical chain head.
    fn chain_info(&self) -> ChainInfo;
}
