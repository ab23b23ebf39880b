use crate::EventGuid;
use alloy_primitives::{Address, Bytes, B256, U256};
use uuid::Uuid;

/// The transaction content carried by a cross-chain message, flattened into
/// the row of the record embedding it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrossChainTransaction {
    /// The sender on the origin chain.
    pub from_address: Address,
    /// The recipient on the destination chain.
    pub to_address: Address,
    /// The amount of ETH carried by the message.
    pub amount: U256,
    /// The calldata relayed to the recipient.
    pub data: Bytes,
    /// The timestamp of the origin-chain block the message was initiated in.
    pub timestamp: u64,
}

/// An L1/L2 token address pair of a standard-bridge transfer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// The token address on the L1.
    pub l1_token_address: Address,
    /// The token address on the L2.
    pub l2_token_address: Address,
}

/// The cross-domain message identity of a standard-bridge transfer.
///
/// Only a single bridge deployment is indexed, so the messenger nonce alone
/// identifies a message within one direction. The nonce is kept grouped in
/// this struct so that generalizing the key to `(messenger, nonce)` stays an
/// additive change.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BridgeMessage {
    /// The nonce assigned by the cross-domain messenger.
    pub nonce: U256,
}

/// A deposit transaction submitted through the portal on the L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDeposit {
    /// The deposit (source) hash derived from the initiating portal log.
    pub deposit_hash: B256,
    /// The GUID of the initiating `TransactionDeposited` event on the L1.
    pub initiated_l1_event_guid: EventGuid,
    /// The deposit version encoded in the portal log.
    pub version: U256,
    /// The opaque data blob the deposit transaction is derived from.
    pub opaque_data: Bytes,
    /// The transaction content.
    pub tx: CrossChainTransaction,
    /// The gas limit of the derived deposit transaction.
    pub gas_limit: U256,
}

/// A withdrawal transaction passed to the L2 message passer.
///
/// The two L1 back-references are populated as the withdrawal advances
/// through its prove and finalize steps. Finalized implies proven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionWithdrawal {
    /// The withdrawal hash emitted by the message passer.
    pub withdrawal_hash: B256,
    /// The GUID of the initiating `MessagePassed` event on the L2.
    pub initiated_l2_event_guid: EventGuid,
    /// The message passer nonce of the withdrawal.
    pub nonce: U256,
    /// The transaction content.
    pub tx: CrossChainTransaction,
    /// The gas limit of the withdrawal transaction.
    pub gas_limit: U256,
    /// The GUID of the L1 `WithdrawalProven` event, once observed.
    pub proven_l1_event_guid: Option<EventGuid>,
    /// The GUID of the L1 `WithdrawalFinalized` event, once observed.
    pub finalized_l1_event_guid: Option<EventGuid>,
}

/// A standard-bridge deposit (L1 → L2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeDeposit {
    /// The unique identifier of the deposit row.
    pub guid: Uuid,
    /// The GUID of the initiating bridge event on the L1.
    pub initiated_l1_event_guid: EventGuid,
    /// The cross-domain message identity.
    pub message: BridgeMessage,
    /// The hash linking to the associated [`TransactionDeposit`].
    pub deposit_hash: B256,
    /// The GUID of the finalizing bridge event on the L2, once observed.
    pub finalized_l2_event_guid: Option<EventGuid>,
    /// The transaction content.
    pub tx: CrossChainTransaction,
    /// The bridged token pair.
    pub token_pair: TokenPair,
}

/// A standard-bridge withdrawal (L2 → L1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeWithdrawal {
    /// The unique identifier of the withdrawal row.
    pub guid: Uuid,
    /// The GUID of the initiating bridge event on the L2.
    pub initiated_l2_event_guid: EventGuid,
    /// The cross-domain message identity.
    pub message: BridgeMessage,
    /// The hash linking to the associated [`TransactionWithdrawal`].
    pub withdrawal_hash: B256,
    /// The GUID of the finalizing bridge event on the L1, once observed.
    pub finalized_l1_event_guid: Option<EventGuid>,
    /// The transaction content.
    pub tx: CrossChainTransaction,
    /// The bridged token pair.
    pub token_pair: TokenPair,
}

/// A [`BridgeDeposit`] joined with the transaction hashes of its initiating
/// and finalizing events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeDepositWithTransactionHashes {
    /// The deposit.
    pub deposit: BridgeDeposit,
    /// The L1 transaction hash that initiated the deposit.
    pub l1_transaction_hash: B256,
    /// The L2 transaction hash that finalized the deposit, once observed.
    pub finalized_l2_transaction_hash: Option<B256>,
}

/// A [`BridgeWithdrawal`] joined with the transaction hashes of its
/// initiating, proving and finalizing events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeWithdrawalWithTransactionHashes {
    /// The withdrawal.
    pub withdrawal: BridgeWithdrawal,
    /// The L2 transaction hash that initiated the withdrawal.
    pub l2_transaction_hash: B256,
    /// The L1 transaction hash that proved the withdrawal, once observed.
    pub proven_l1_transaction_hash: Option<B256>,
    /// The L1 transaction hash that finalized the withdrawal, once observed.
    pub finalized_l1_transaction_hash: Option<B256>,
}
