//! The database models for the bridge indexer.

/// The model for standard-bridge deposits.
pub mod bridge_deposit;

/// The model for standard-bridge withdrawals.
pub mod bridge_withdrawal;

/// The model for L1 block headers.
pub mod l1_block_header;

/// The model for L1 contract events.
pub mod l1_contract_event;

/// The model for L2 block headers.
pub mod l2_block_header;

/// The model for L2 contract events.
pub mod l2_contract_event;

/// The model for legacy state batches.
pub mod legacy_state_batch;

/// The model for output proposals.
pub mod output_proposal;

/// The model for portal transaction deposits.
pub mod transaction_deposit;

/// The model for message-passer transaction withdrawals.
pub mod transaction_withdrawal;
