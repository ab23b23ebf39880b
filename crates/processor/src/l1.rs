use crate::{BatchHandler, EventBatch, ProcessorError};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolEvent;
use bridge_indexer_client::PortalReader;
use bridge_indexer_contracts::{
    oracle::{OutputProposed, StateBatchAppended},
    portal::{TransactionDeposited, WithdrawalFinalized, WithdrawalProven},
    standard_bridge, DepositTransaction, StandardBridgeEvent,
};
use bridge_indexer_db::{Database, DatabaseOperations, DatabaseTransaction};
use bridge_indexer_primitives::{
    BlockHeaderInfo, BridgeDeposit, BridgeMessage, Chain, CrossChainTransaction, L1Contracts,
    LegacyStateBatch, OutputProposal, TokenPair, TransactionDeposit,
};
use uuid::Uuid;

/// The L1 batch handler: portal deposits, withdrawal prove/finalize, output
/// proposals, legacy state batches and the L1 side of the standard bridge.
#[derive(Debug)]
pub struct L1Handler<PR> {
    contracts: L1Contracts,
    portal: PR,
}

impl<PR> L1Handler<PR> {
    /// Returns a new [`L1Handler`] watching the provided contracts and using
    /// the portal reader for the withdrawal lag check.
    pub const fn new(contracts: L1Contracts, portal: PR) -> Self {
        Self { contracts, portal }
    }
}

#[async_trait::async_trait]
impl<PR: PortalReader> BatchHandler for L1Handler<PR> {
    fn chain(&self) -> Chain {
        Chain::L1
    }

    fn addresses(&self) -> Vec<Address> {
        self.contracts.addresses()
    }

    async fn latest_indexed_header(
        &self,
        db: &Database,
    ) -> Result<Option<BlockHeaderInfo>, ProcessorError> {
        Ok(db.latest_l1_block_header().await?)
    }

    async fn process_batch(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        // L1 persistence is sparse: only blocks carrying in-scope logs are
        // indexed.
        let headers = batch.headers_with_logs();
        if headers.is_empty() {
            tracing::debug!(target: "indexer::processor", batch_size = batch.headers().len(), "no L1 blocks of interest within batch");
            return Ok(());
        }

        tracing::info!(
            target: "indexer::processor",
            size = headers.len(),
            batch_size = batch.headers().len(),
            "saving L1 blocks with bridge logs"
        );
        tx.insert_l1_block_headers(headers).await?;
        tx.insert_l1_contract_events(batch.event_metas()).await?;

        self.process_checkpoints(tx, batch).await?;
        self.process_bridge_transactions(tx, batch).await?;
        self.process_standard_bridge(tx, batch).await?;

        Ok(())
    }
}

impl<PR: PortalReader> L1Handler<PR> {
    /// Records the L2 checkpoints posted on the L1: output proposals and
    /// legacy state batches.
    async fn process_checkpoints(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        let mut proposals = Vec::new();
        for event in batch.events_with_signature(OutputProposed::SIGNATURE_HASH) {
            let proposed = event.decode::<OutputProposed>("OutputProposed")?;
            proposals.push(OutputProposal {
                output_root: proposed.outputRoot,
                l2_output_index: proposed.l2OutputIndex,
                l2_block_number: proposed.l2BlockNumber.saturating_to(),
                l1_contract_event_guid: event.meta.guid,
            });
        }
        if !proposals.is_empty() {
            tracing::info!(target: "indexer::processor", size = proposals.len(), "detected output proposals");
            tx.insert_output_proposals(proposals).await?;
        }

        let mut batches = Vec::new();
        for event in batch.events_with_signature(StateBatchAppended::SIGNATURE_HASH) {
            let appended = event.decode::<StateBatchAppended>("StateBatchAppended")?;
            batches.push(LegacyStateBatch {
                index: appended.batchIndex.saturating_to(),
                root: appended.batchRoot,
                size: appended.batchSize.saturating_to(),
                prev_total: appended.prevTotalElements.saturating_to(),
                l1_contract_event_guid: event.meta.guid,
            });
        }
        if !batches.is_empty() {
            tracing::info!(target: "indexer::processor", size = batches.len(), "detected legacy state batches");
            tx.insert_legacy_state_batches(batches).await?;
        }

        Ok(())
    }

    /// Handles the portal events: new deposits and the prove/finalize steps
    /// of withdrawals.
    async fn process_bridge_transactions(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        // (1) detect deposits.
        let mut deposits = Vec::new();
        for event in batch.events_with_signature(TransactionDeposited::SIGNATURE_HASH) {
            let deposited = event.decode::<TransactionDeposited>("TransactionDeposited")?;
            let deposit_tx = DepositTransaction::from_deposited_event(
                event.meta.block_hash,
                event.meta.log_index,
                &deposited,
            )?;

            deposits.push(TransactionDeposit {
                deposit_hash: deposit_tx.source_hash,
                initiated_l1_event_guid: event.meta.guid,
                version: deposited.version,
                opaque_data: deposited.opaqueData.clone(),
                gas_limit: U256::from(deposit_tx.gas_limit),
                tx: CrossChainTransaction {
                    from_address: deposit_tx.from,
                    to_address: deposit_tx.to,
                    amount: deposit_tx.value,
                    data: deposit_tx.data,
                    timestamp: event.meta.timestamp,
                },
            });
        }
        if !deposits.is_empty() {
            tracing::info!(target: "indexer::processor", size = deposits.len(), "detected transaction deposits");
            tx.insert_transaction_deposits(deposits).await?;
        }

        // (2) prove withdrawals.
        let latest_l2_header = tx.latest_l2_block_header().await?;
        let mut proven = 0usize;
        for event in batch.events_with_signature(WithdrawalProven::SIGNATURE_HASH) {
            let withdrawal_hash = event.decode::<WithdrawalProven>("WithdrawalProven")?.withdrawalHash;

            if tx.transaction_withdrawal_by_hash(withdrawal_hash).await?.is_none() {
                // Check whether the L2 processor is behind or the withdrawal
                // was really missed.
                let proven_view = self.portal.proven_withdrawal(withdrawal_hash).await?;
                let l2_behind = latest_l2_header
                    .as_ref()
                    .map(|header| proven_view.l2_output_index > U256::from(header.number))
                    .unwrap_or(true);
                if l2_behind {
                    tracing::warn!(target: "indexer::processor", ?withdrawal_hash, "behind on indexed L2 withdrawals");
                    return Err(ProcessorError::WaitingForPeer {
                        chain: Chain::L2,
                        context: "withdrawal proven ahead of indexed L2 state",
                    });
                }
                tracing::error!(target: "indexer::processor", ?withdrawal_hash, "withdrawal missing");
                return Err(ProcessorError::MissingPredecessor {
                    entity: "transaction withdrawal",
                    reference: withdrawal_hash.to_string(),
                });
            }

            tx.mark_transaction_withdrawal_proven(withdrawal_hash, event.meta.guid).await?;
            proven += 1;
        }
        if proven > 0 {
            tracing::info!(target: "indexer::processor", size = proven, "proven transaction withdrawals");
        }

        // (3) finalize withdrawals. Proving precedes finalization on-chain,
        // so a missing row here is never an L2 lag.
        let mut finalized = 0usize;
        for event in batch.events_with_signature(WithdrawalFinalized::SIGNATURE_HASH) {
            let withdrawal_hash =
                event.decode::<WithdrawalFinalized>("WithdrawalFinalized")?.withdrawalHash;

            if tx.transaction_withdrawal_by_hash(withdrawal_hash).await?.is_none() {
                tracing::error!(target: "indexer::processor", ?withdrawal_hash, "withdrawal missing");
                return Err(ProcessorError::MissingPredecessor {
                    entity: "transaction withdrawal",
                    reference: withdrawal_hash.to_string(),
                });
            }

            tx.mark_transaction_withdrawal_finalized(withdrawal_hash, event.meta.guid).await?;
            finalized += 1;
        }
        if finalized > 0 {
            tracing::info!(target: "indexer::processor", size = finalized, "finalized transaction withdrawals");
        }

        Ok(())
    }

    /// Handles the L1 standard-bridge events: new bridge deposits and the
    /// finalization of bridge withdrawals.
    async fn process_standard_bridge(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError> {
        // New deposits. The portal's TransactionDeposited log sits in the
        // slot right after the bridge event; it carries the deposit hash.
        let mut deposits = Vec::new();
        for event in batch.events_with_signature(standard_bridge::DepositInitiated::SIGNATURE_HASH)
        {
            let initiated: StandardBridgeEvent =
                event.decode::<standard_bridge::DepositInitiated>("DepositInitiated")?.into();

            let adjacent = batch.adjacent_event(event).ok_or_else(|| {
                ProcessorError::MissingPredecessor {
                    entity: "adjacent TransactionDeposited log",
                    reference: event.meta.guid.to_string(),
                }
            })?;
            let deposited = adjacent.decode::<TransactionDeposited>("TransactionDeposited")?;
            let deposit_tx = DepositTransaction::from_deposited_event(
                adjacent.meta.block_hash,
                adjacent.meta.log_index,
                &deposited,
            )?;

            deposits.push(BridgeDeposit {
                guid: Uuid::new_v4(),
                initiated_l1_event_guid: event.meta.guid,
                message: BridgeMessage { nonce: initiated.message_nonce },
                deposit_hash: deposit_tx.source_hash,
                finalized_l2_event_guid: None,
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
        if !deposits.is_empty() {
            tracing::info!(target: "indexer::processor", size = deposits.len(), "detected standard bridge deposits");
            tx.insert_bridge_deposits(deposits).await?;
        }

        // Finalized withdrawals. The withdrawal was proven on this chain
        // before finalizing, so a missing row is always fatal.
        let mut finalized = 0usize;
        for event in
            batch.events_with_signature(standard_bridge::WithdrawalFinalized::SIGNATURE_HASH)
        {
            let event_data: StandardBridgeEvent = event
                .decode::<standard_bridge::WithdrawalFinalized>("WithdrawalFinalized")?
                .into();
            let nonce = event_data.message_nonce;

            let withdrawal = tx.bridge_withdrawal_by_message_nonce(nonce).await?.ok_or_else(
                || ProcessorError::MissingPredecessor {
                    entity: "bridge withdrawal",
                    reference: nonce.to_string(),
                },
            )?;

            tx.mark_bridge_withdrawal_finalized(withdrawal.guid, event.meta.guid).await?;
            finalized += 1;
        }
        if finalized > 0 {
            tracing::info!(target: "indexer::processor", size = finalized, "finalized standard bridge withdrawals");
        }

        Ok(())
    }
}

