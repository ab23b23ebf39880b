use crate::EventGuid;
use alloy_primitives::{B256, U256};

/// An L2 output root proposed on the L1 output oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputProposal {
    /// The proposed output root.
    pub output_root: B256,
    /// The index of the output in the oracle.
    pub l2_output_index: U256,
    /// The L2 block number the output commits to.
    pub l2_block_number: u64,
    /// The GUID of the `OutputProposed` event on the L1.
    pub l1_contract_event_guid: EventGuid,
}

/// A legacy state commitment batch appended on the L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyStateBatch {
    /// The index of the batch.
    pub index: u64,
    /// The root of the batch.
    pub root: B256,
    /// The number of elements in the batch.
    pub size: u64,
    /// The total number of elements preceding the batch.
    pub prev_total: u64,
    /// The GUID of the `StateBatchAppended` event on the L1.
    pub l1_contract_event_guid: EventGuid,
}
