//! Primitive types for the bridge indexer.

pub use block::BlockHeaderInfo;
mod block;

pub use event::{ContractEventMeta, EventGuid};
mod event;

pub use bridge::{
    BridgeDeposit, BridgeDepositWithTransactionHashes, BridgeMessage, BridgeWithdrawal,
    BridgeWithdrawalWithTransactionHashes, CrossChainTransaction, TokenPair, TransactionDeposit,
    TransactionWithdrawal,
};
mod bridge;

pub use checkpoint::{LegacyStateBatch, OutputProposal};
mod checkpoint;

pub use config::{Chain, IndexerConfig, L1Contracts, L2Contracts};
mod config;
