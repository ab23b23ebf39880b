use crate::{BatchHandler, EventBatch, ProcessorError};

use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use bridge_indexer_contracts::{
    message_passer::MessagePassed,
    standard_bridge::{self, StandardBridgeEvent},
};
use bridge_indexer_db::{Database, DatabaseOperations, DatabaseTransaction};
use bridge_indexer_primitives::{
    BlockHeaderInfo, BridgeMessage, BridgeWithdrawal, Chain, CrossChainTransaction, L2Contracts,
    TokenPair, TransactionWithdrawal,
};
use uuid::Uuid;

/// The L2 batch handler: message-passer withdrawals and the L2 side of the
/// standard bridge.
#[derive(Debug)]
pub struct L2Handler {
    contracts: L2Contracts,
}

impl L2Handler {
    /// Returns a new [`L2Handler`] watching the provided contracts.
    pub const fn new(contracts: L2Contracts) -> Self {
        Self { contracts }
    }
}

#[async_trait::async_trait]
impl BatchHandler for L2Handler {
    fn chain(&self) -> Chain {
        Chain::L2
    }

    fn addresses(&self) -> Vec<Address> {
        self.contracts.addresses()
    }

    async fn latest_indexed_header(
        &self,
        db: &Database,
    ) -> Result<Option<BlockHeaderInfo>, ProcessorError> {
        Ok(db.latest_l2_block_header().await?)
    }

    async fn process_batch(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        // L2 persistence is dense: every block drives deposit finalization
        // discovery, logs or not.
        tracing::info!(target: "indexer::processor", size = batch.headers().len(), "saving L2 blocks");
        tx.insert_l2_block_headers(batch.headers().to_vec()).await?;

        let events = batch.event_metas();
        if events.is_empty() {
            return Ok(());
        }
        tracing::info!(target: "indexer::processor", size = events.len(), "detected contract logs");
        tx.insert_l2_contract_events(events).await?;

        self.process_bridge_transactions(tx, batch).await?;
        self.process_standard_bridge(tx, batch).await?;

        Ok(())
    }
}

impl L2Handler {
    /// Handles the message-passer events: new transaction withdrawals.
    async fn process_bridge_transactions(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        let mut withdrawals = Vec::new();
        for event in batch.events_with_signature(MessagePassed::SIGNATURE_HASH) {
            let passed = event.decode::<MessagePassed>("MessagePassed")?;
            withdrawals.push(TransactionWithdrawal {
                withdrawal_hash: passed.withdrawalHash,
                initiated_l2_event_guid: event.meta.guid,
                nonce: passed.nonce,
                gas_limit: passed.gasLimit,
                tx: CrossChainTransaction {
                    from_address: passed.sender,
                    to_address: passed.target,
                    amount: passed.value,
                    data: passed.data.clone(),
                    timestamp: event.meta.timestamp,
                },
                proven_l1_event_guid: None,
                finalized_l1_event_guid: None,
            });
        }

        if !withdrawals.is_empty() {
            tracing::info!(target: "indexer::processor", size = withdrawals.len(), "detected transaction withdrawals");
            tx.insert_transaction_withdrawals(withdrawals).await?;
        }

        Ok(())
    }

    /// Handles the L2 standard-bridge events: new bridge withdrawals and the
    /// finalization of bridge deposits.
    async fn process_standard_bridge(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        // New withdrawals. The message passer's MessagePassed log sits in the
        // slot right after the bridge event; it carries the withdrawal hash.
        let mut withdrawals = Vec::new();
        for event in
            batch.events_with_signature(standard_bridge::WithdrawalInitiated::SIGNATURE_HASH)
        {
            let initiated: StandardBridgeEvent =
                event.decode::<standard_bridge::WithdrawalInitiated>("WithdrawalInitiated")?.into();

            let adjacent = batch.adjacent_event(event).ok_or_else(|| {
                ProcessorError::MissingPredecessor {
                    entity: "adjacent MessagePassed log",
                    reference: event.meta.guid.to_string(),
                }
            })?;
            let passed = adjacent.decode::<MessagePassed>("MessagePassed")?;

            withdrawals.push(BridgeWithdrawal {
                guid: Uuid::new_v4(),
                initiated_l2_event_guid: event.meta.guid,
                message: BridgeMessage { nonce: initiated.message_nonce },
                withdrawal_hash: passed.withdrawalHash,
                finalized_l1_event_guid: None,
                tx: CrossChainTransaction {
                    from_address: initiated.from,
                    to_address: initiated.to,
                    amount: initiated.amount,
                    data: initiated.extra_data,
                    timestamp: event.meta.timestamp,
                },
                token_pair: TokenPair {
                    l1_token_address: initiated.l1_token,
                    l2_token_address: initiated.l2_token,
                },
            });
        }
        if !withdrawals.is_empty() {
            tracing::info!(target: "indexer::processor", size = withdrawals.len(), "detected standard bridge withdrawals");
            tx.insert_bridge_withdrawals(withdrawals).await?;
        }

        // Finalized deposits. A missing row is either the L1 processor
        // lagging (nonce past everything indexed) or genuinely missed data.
        let mut finalized = 0usize;
        for event in batch.events_with_signature(standard_bridge::DepositFinalized::SIGNATURE_HASH)
        {
            let event_data: StandardBridgeEvent =
                event.decode::<standard_bridge::DepositFinalized>("DepositFinalized")?.into();
            let nonce = event_data.message_nonce;

            match tx.bridge_deposit_by_message_nonce(nonce).await? {
                Some(deposit) => {
                    tx.mark_bridge_deposit_finalized(deposit.guid, event.meta.guid).await?;
                    finalized += 1;
                }
                None => {
                    let latest_nonce = tx.latest_bridge_deposit_message_nonce().await?;
                    let l1_behind = latest_nonce.map(|latest| nonce > latest).unwrap_or(true);
                    if l1_behind {
                        tracing::warn!(target: "indexer::processor", %nonce, "behind on indexed L1 deposits");
                        return Err(ProcessorError::WaitingForPeer {
                            chain: Chain::L1,
                            context: "deposit finalized ahead of indexed L1 state",
                        });
                    }
                    tracing::error!(target: "indexer::processor", %nonce, "deposit missing");
                    return Err(ProcessorError::MissingPredecessor {
                        entity: "bridge deposit",
                        reference: nonce.to_string(),
                    });
                }
            }
        }
        if finalized > 0 {
            tracing::info!(target: "indexer::processor", size = finalized, "finalized standard bridge deposits");
        }

        Ok(())
    }
}
