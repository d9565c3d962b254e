use lodestone_primitives::{BlockHash, Header, SealedHeader, U256};

/// Generates a range of random [SealedHeader]s.
///
/// The parent hash of the first header in the result will be equal to
/// `head`.
///
/// The headers are assumed to not be correct if validated.
pub fn random_header_range(rng: std::ops::Range<u64>, head: BlockHash) -> Vec<SealedHeader> {
    let mut headers = Vec::with_capacity(rng.end.saturating_sub(rng.start) as usize);
    for idx in rng {
        headers.push(random_header(
            idx,
            Some(headers.last().map(|h: &SealedHeader| h.hash()).unwrap_or(head)),
        ));
    }
    headers
}

/// Generate a random [SealedHeader].
///
/// The header is assumed to not be correct if validated.
pub fn random_header(number: u64, parent: Option<BlockHash>) -> SealedHeader {
    let header = Header {
        number,
        difficulty: U256::from(rand::random::<u32>()),
        parent_hash: parent.unwrap_or_default(),
        gas_limit: 1_000_000,
        timestamp: rand::random::<u32>() as u64,
        ..Default::default()
    };
    header.seal_slow()
}

/// Generate a valid direct child of `parent`.
///
/// Unlike [random_header], the child links to the parent by hash, number and
/// timestamp, so it passes structural parent/child checks.
pub fn child_header(parent: &SealedHeader) -> SealedHeader {
    let mut child = parent.header().clone();
    child.number = parent.number + 1;
    child.parent_hash = parent.hash();
    child.timestamp = parent.timestamp + 1;
    child.seal_slow()
}
