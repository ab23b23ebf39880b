use alloy_primitives::{Bytes, B256};
use uuid::Uuid;

/// The opaque unique identifier assigned to a contract event at ingest.
pub type EventGuid = Uuid;

/// A contract event scraped from one of the indexed chains.
///
/// The GUID is assigned when the raw log is first seen and is the stable
/// reference other records use to point at the event. Uniqueness within a
/// chain is `(block_hash, log_index)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEventMeta {
    /// The opaque unique identifier of the event.
    pub guid: EventGuid,
    /// The hash of the block the event was emitted in.
    pub block_hash: B256,
    /// The hash of the transaction the event was emitted by.
    pub transaction_hash: B256,
    /// The index of the log within the block.
    pub log_index: u64,
    /// The event signature, i.e. `topic[0]` of the raw log.
    pub signature: B256,
    /// The raw, undecoded event data.
    pub data: Bytes,
    /// The timestamp of the parent block.
    pub timestamp: u64,
}

#[cfg(any(test, feature = "arbitrary"))]
impl arbitrary::Arbitrary<'_> for ContractEventMeta {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self {
            guid: Uuid::from_bytes(u.arbitrary()?),
            block_hash: B256::arbitrary(u)?,
            transaction_hash: B256::arbitrary(u)?,
            log_index: u.int_in_range(0..=u16::MAX)? as u64,
            signature: B256::arbitrary(u)?,
            data: Bytes::from(u.arbitrary::<Vec<u8>>()?),
            timestamp: u.int_in_range(0..=u32::MAX)? as u64,
        })
    }
}
