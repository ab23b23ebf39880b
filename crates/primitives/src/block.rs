use alloy_primitives::B256;
use core::cmp::Ordering;

/// Information about a block header relevant to the indexer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockHeaderInfo {
    /// The block hash.
    pub hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block number.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
}

impl BlockHeaderInfo {
    /// Returns a new instance of [`BlockHeaderInfo`].
    pub const fn new(hash: B256, parent_hash: B256, number: u64, timestamp: u64) -> Self {
        Self { hash, parent_hash, number, timestamp }
    }

    /// Returns true if `child` extends `self` in the canonical chain.
    pub fn is_parent_of(&self, child: &Self) -> bool {
        child.parent_hash == self.hash && child.number == self.number + 1
    }
}

impl PartialOrd for BlockHeaderInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.number.partial_cmp(&other.number)
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl arbitrary::Arbitrary<'_> for BlockHeaderInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let number = u.int_in_range(0..=u32::MAX)? as u64;
        Ok(Self {
            hash: B256::arbitrary(u)?,
            parent_hash: B256::arbitrary(u)?,
            number,
            timestamp: u.int_in_range(0..=u32::MAX)? as u64,
        })
    }
}
