use super::{models, DatabaseError};
use crate::DatabaseConnectionProvider;

use alloy_primitives::{Address, B256, U256};
use bridge_indexer_primitives::{
    BlockHeaderInfo, BridgeDeposit, BridgeDepositWithTransactionHashes, BridgeWithdrawal,
    BridgeWithdrawalWithTransactionHashes, ContractEventMeta, LegacyStateBatch, OutputProposal,
    TransactionDeposit, TransactionWithdrawal,
};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

/// The hard cap on the rows returned by the by-address list queries.
const ADDRESS_QUERY_LIMIT: u64 = 100;

/// Collapses the `RecordNotInserted` outcome of a fully-conflicting upsert
/// into a success.
fn ignore_not_inserted<T>(result: Result<T, DbErr>) -> Result<(), DbErr> {
    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(err) => Err(err),
    }
}

/// The [`DatabaseOperations`] trait provides methods for interacting with the database.
///
/// It is implemented for every [`DatabaseConnectionProvider`], so the same
/// operations run against the [`crate::Database`] directly or within a
/// [`crate::DatabaseTransaction`].
#[async_trait::async_trait]
pub trait DatabaseOperations: DatabaseConnectionProvider + Sync {
    /// Upserts the provided L1 block headers, keyed by hash.
    async fn insert_l1_block_headers(
        &self,
        headers: Vec<BlockHeaderInfo>,
    ) -> Result<(), DatabaseError> {
        if headers.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = headers.len(), "Inserting L1 block headers into database.");
        let models = headers.into_iter().map(Into::<models::l1_block_header::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::l1_block_header::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::l1_block_header::Column::Hash)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided L2 block headers, keyed by hash.
    async fn insert_l2_block_headers(
        &self,
        headers: Vec<BlockHeaderInfo>,
    ) -> Result<(), DatabaseError> {
        if headers.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = headers.len(), "Inserting L2 block headers into database.");
        let models = headers.into_iter().map(Into::<models::l2_block_header::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::l2_block_header::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::l2_block_header::Column::Hash)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Returns the highest indexed L1 block header, i.e. the L1 checkpoint.
    async fn latest_l1_block_header(&self) -> Result<Option<BlockHeaderInfo>, DatabaseError> {
        Ok(models::l1_block_header::Entity::find()
            .order_by_desc(models::l1_block_header::Column::Number)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Returns the highest indexed L2 block header, i.e. the L2 checkpoint.
    async fn latest_l2_block_header(&self) -> Result<Option<BlockHeaderInfo>, DatabaseError> {
        Ok(models::l2_block_header::Entity::find()
            .order_by_desc(models::l2_block_header::Column::Number)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Upserts the provided output proposals, keyed by output root.
    async fn insert_output_proposals(
        &self,
        proposals: Vec<OutputProposal>,
    ) -> Result<(), DatabaseError> {
        if proposals.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = proposals.len(), "Inserting output proposals into database.");
        let models = proposals.into_iter().map(Into::<models::output_proposal::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::output_proposal::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::output_proposal::Column::OutputRoot)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided legacy state batches, keyed by batch index.
    async fn insert_legacy_state_batches(
        &self,
        batches: Vec<LegacyStateBatch>,
    ) -> Result<(), DatabaseError> {
        if batches.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = batches.len(), "Inserting legacy state batches into database.");
        let models = batches.into_iter().map(Into::<models::legacy_state_batch::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::legacy_state_batch::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::legacy_state_batch::Column::Index)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided L1 contract events, keyed by `(block_hash, log_index)`.
    async fn insert_l1_contract_events(
        &self,
        events: Vec<ContractEventMeta>,
    ) -> Result<(), DatabaseError> {
        if events.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = events.len(), "Inserting L1 contract events into database.");
        let models = events.into_iter().map(Into::<models::l1_contract_event::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::l1_contract_event::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        models::l1_contract_event::Column::BlockHash,
                        models::l1_contract_event::Column::LogIndex,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided L2 contract events, keyed by `(block_hash, log_index)`.
    async fn insert_l2_contract_events(
        &self,
        events: Vec<ContractEventMeta>,
    ) -> Result<(), DatabaseError> {
        if events.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = events.len(), "Inserting L2 contract events into database.");
        let models = events.into_iter().map(Into::<models::l2_contract_event::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::l2_contract_event::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        models::l2_contract_event::Column::BlockHash,
                        models::l2_contract_event::Column::LogIndex,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Returns the L1 contract event with the provided GUID.
    async fn l1_contract_event(
        &self,
        guid: Uuid,
    ) -> Result<Option<ContractEventMeta>, DatabaseError> {
        Ok(models::l1_contract_event::Entity::find_by_id(guid)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Returns the L2 contract event with the provided GUID.
    async fn l2_contract_event(
        &self,
        guid: Uuid,
    ) -> Result<Option<ContractEventMeta>, DatabaseError> {
        Ok(models::l2_contract_event::Entity::find_by_id(guid)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Upserts the provided transaction deposits, keyed by deposit hash.
    async fn insert_transaction_deposits(
        &self,
        deposits: Vec<TransactionDeposit>,
    ) -> Result<(), DatabaseError> {
        if deposits.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = deposits.len(), "Inserting transaction deposits into database.");
        let models =
            deposits.into_iter().map(Into::<models::transaction_deposit::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::transaction_deposit::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::transaction_deposit::Column::DepositHash)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided transaction withdrawals, keyed by withdrawal hash.
    async fn insert_transaction_withdrawals(
        &self,
        withdrawals: Vec<TransactionWithdrawal>,
    ) -> Result<(), DatabaseError> {
        if withdrawals.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = withdrawals.len(), "Inserting transaction withdrawals into database.");
        let models =
            withdrawals.into_iter().map(Into::<models::transaction_withdrawal::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::transaction_withdrawal::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(models::transaction_withdrawal::Column::WithdrawalHash)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Returns the transaction withdrawal with the provided withdrawal hash.
    async fn transaction_withdrawal_by_hash(
        &self,
        withdrawal_hash: B256,
    ) -> Result<Option<TransactionWithdrawal>, DatabaseError> {
        Ok(models::transaction_withdrawal::Entity::find_by_id(withdrawal_hash.to_vec())
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Marks the withdrawal with the provided hash as proven by the L1 event.
    ///
    /// The withdrawal must already be indexed.
    async fn mark_transaction_withdrawal_proven(
        &self,
        withdrawal_hash: B256,
        proven_l1_event_guid: Uuid,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "indexer::db", ?withdrawal_hash, "Marking transaction withdrawal proven in database.");
        self.transaction_withdrawal_by_hash(withdrawal_hash)
            .await?
            .ok_or(DatabaseError::WithdrawalNotFound(withdrawal_hash))?;

        models::transaction_withdrawal::Entity::update_many()
            .filter(
                models::transaction_withdrawal::Column::WithdrawalHash.eq(withdrawal_hash.to_vec()),
            )
            .col_expr(
                models::transaction_withdrawal::Column::ProvenL1EventGuid,
                Expr::value(Some(proven_l1_event_guid)),
            )
            .exec(self.get_connection())
            .await?;

        Ok(())
    }

    /// Marks the withdrawal with the provided hash as finalized by the L1
    /// event.
    ///
    /// The withdrawal must already be indexed and proven.
    async fn mark_transaction_withdrawal_finalized(
        &self,
        withdrawal_hash: B256,
        finalized_l1_event_guid: Uuid,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "indexer::db", ?withdrawal_hash, "Marking transaction withdrawal finalized in database.");
        let withdrawal = self
            .transaction_withdrawal_by_hash(withdrawal_hash)
            .await?
            .ok_or(DatabaseError::WithdrawalNotFound(withdrawal_hash))?;

        if withdrawal.proven_l1_event_guid.is_none() {
            return Err(DatabaseError::FinalizedBeforeProven(withdrawal_hash));
        }

        models::transaction_withdrawal::Entity::update_many()
            .filter(
                models::transaction_withdrawal::Column::WithdrawalHash.eq(withdrawal_hash.to_vec()),
            )
            .col_expr(
                models::transaction_withdrawal::Column::FinalizedL1EventGuid,
                Expr::value(Some(finalized_l1_event_guid)),
            )
            .exec(self.get_connection())
            .await?;

        Ok(())
    }

    /// Upserts the provided bridge deposits, keyed by messenger nonce.
    async fn insert_bridge_deposits(
        &self,
        deposits: Vec<BridgeDeposit>,
    ) -> Result<(), DatabaseError> {
        if deposits.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = deposits.len(), "Inserting bridge deposits into database.");
        let models = deposits.into_iter().map(Into::<models::bridge_deposit::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::bridge_deposit::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(
                        models::bridge_deposit::Column::CrossDomainMessengerNonce,
                    )
                    .do_nothing()
                    .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Upserts the provided bridge withdrawals, keyed by messenger nonce.
    async fn insert_bridge_withdrawals(
        &self,
        withdrawals: Vec<BridgeWithdrawal>,
    ) -> Result<(), DatabaseError> {
        if withdrawals.is_empty() {
            return Ok(());
        }
        tracing::trace!(target: "indexer::db", size = withdrawals.len(), "Inserting bridge withdrawals into database.");
        let models =
            withdrawals.into_iter().map(Into::<models::bridge_withdrawal::ActiveModel>::into);
        Ok(ignore_not_inserted(
            models::bridge_withdrawal::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(
                        models::bridge_withdrawal::Column::CrossDomainMessengerNonce,
                    )
                    .do_nothing()
                    .to_owned(),
                )
                .exec(self.get_connection())
                .await,
        )?)
    }

    /// Returns the bridge deposit with the provided messenger nonce.
    async fn bridge_deposit_by_message_nonce(
        &self,
        nonce: U256,
    ) -> Result<Option<BridgeDeposit>, DatabaseError> {
        Ok(models::bridge_deposit::Entity::find()
            .filter(
                models::bridge_deposit::Column::CrossDomainMessengerNonce
                    .eq(nonce.to_be_bytes::<32>().to_vec()),
            )
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Returns the bridge withdrawal with the provided messenger nonce.
    async fn bridge_withdrawal_by_message_nonce(
        &self,
        nonce: U256,
    ) -> Result<Option<BridgeWithdrawal>, DatabaseError> {
        Ok(models::bridge_withdrawal::Entity::find()
            .filter(
                models::bridge_withdrawal::Column::CrossDomainMessengerNonce
                    .eq(nonce.to_be_bytes::<32>().to_vec()),
            )
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Returns the highest messenger nonce among the indexed bridge deposits.
    ///
    /// Nonces are stored as 32-byte big-endian blobs, so the lexicographic
    /// column order is the numeric order.
    async fn latest_bridge_deposit_message_nonce(&self) -> Result<Option<U256>, DatabaseError> {
        Ok(models::bridge_deposit::Entity::find()
            .order_by_desc(models::bridge_deposit::Column::CrossDomainMessengerNonce)
            .one(self.get_connection())
            .await
            .map(|x| x.map(|model| BridgeDeposit::from(model).message.nonce))?)
    }

    /// Returns the highest messenger nonce among the indexed bridge
    /// withdrawals.
    async fn latest_bridge_withdrawal_message_nonce(&self) -> Result<Option<U256>, DatabaseError> {
        Ok(models::bridge_withdrawal::Entity::find()
            .order_by_desc(models::bridge_withdrawal::Column::CrossDomainMessengerNonce)
            .one(self.get_connection())
            .await
            .map(|x| x.map(|model| BridgeWithdrawal::from(model).message.nonce))?)
    }

    /// Marks the bridge deposit as finalized by the L2 event.
    ///
    /// The deposit must already be indexed.
    async fn mark_bridge_deposit_finalized(
        &self,
        guid: Uuid,
        finalized_l2_event_guid: Uuid,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "indexer::db", %guid, "Marking bridge deposit finalized in database.");
        models::bridge_deposit::Entity::find_by_id(guid)
            .one(self.get_connection())
            .await?
            .ok_or(DatabaseError::BridgeDepositNotFound(guid))?;

        models::bridge_deposit::Entity::update_many()
            .filter(models::bridge_deposit::Column::Guid.eq(guid))
            .col_expr(
                models::bridge_deposit::Column::FinalizedL2EventGuid,
                Expr::value(Some(finalized_l2_event_guid)),
            )
            .exec(self.get_connection())
            .await?;

        Ok(())
    }

    /// Marks the bridge withdrawal as finalized by the L1 event.
    ///
    /// The withdrawal must already be indexed.
    async fn mark_bridge_withdrawal_finalized(
        &self,
        guid: Uuid,
        finalized_l1_event_guid: Uuid,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "indexer::db", %guid, "Marking bridge withdrawal finalized in database.");
        models::bridge_withdrawal::Entity::find_by_id(guid)
            .one(self.get_connection())
            .await?
            .ok_or(DatabaseError::BridgeWithdrawalNotFound(guid))?;

        models::bridge_withdrawal::Entity::update_many()
            .filter(models::bridge_withdrawal::Column::Guid.eq(guid))
            .col_expr(
                models::bridge_withdrawal::Column::FinalizedL1EventGuid,
                Expr::value(Some(finalized_l1_event_guid)),
            )
            .exec(self.get_connection())
            .await?;

        Ok(())
    }

    /// Returns the bridge deposits sent from the provided address, newest
    /// first, joined with the transaction hashes of their initiating and
    /// finalizing events. Capped at 100 rows.
    async fn bridge_deposits_by_address(
        &self,
        address: Address,
    ) -> Result<Vec<BridgeDepositWithTransactionHashes>, DatabaseError> {
        let deposits: Vec<BridgeDeposit> = models::bridge_deposit::Entity::find()
            .filter(models::bridge_deposit::Column::FromAddress.eq(address.to_vec()))
            .order_by_desc(models::bridge_deposit::Column::Timestamp)
            .limit(ADDRESS_QUERY_LIMIT)
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let initiated = self
            .l1_transaction_hashes(deposits.iter().map(|d| d.initiated_l1_event_guid).collect())
            .await?;
        let finalized = self
            .l2_transaction_hashes(
                deposits.iter().filter_map(|d| d.finalized_l2_event_guid).collect(),
            )
            .await?;

        Ok(deposits
            .into_iter()
            .map(|deposit| BridgeDepositWithTransactionHashes {
                l1_transaction_hash: initiated
                    .get(&deposit.initiated_l1_event_guid)
                    .copied()
                    .unwrap_or_default(),
                finalized_l2_transaction_hash: deposit
                    .finalized_l2_event_guid
                    .and_then(|guid| finalized.get(&guid).copied()),
                deposit,
            })
            .collect())
    }

    /// Returns the bridge withdrawals sent from the provided address, newest
    /// first, joined with the transaction hashes of their initiating, proving
    /// and finalizing events. Capped at 100 rows.
    async fn bridge_withdrawals_by_address(
        &self,
        address: Address,
    ) -> Result<Vec<BridgeWithdrawalWithTransactionHashes>, DatabaseError> {
        let withdrawals: Vec<BridgeWithdrawal> = models::bridge_withdrawal::Entity::find()
            .filter(models::bridge_withdrawal::Column::FromAddress.eq(address.to_vec()))
            .order_by_desc(models::bridge_withdrawal::Column::Timestamp)
            .limit(ADDRESS_QUERY_LIMIT)
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        // The proven reference lives on the associated transaction
        // withdrawal.
        let mut proven_guids = Vec::with_capacity(withdrawals.len());
        for withdrawal in &withdrawals {
            if let Some(tx_withdrawal) =
                self.transaction_withdrawal_by_hash(withdrawal.withdrawal_hash).await?
            {
                if let Some(guid) = tx_withdrawal.proven_l1_event_guid {
                    proven_guids.push((withdrawal.withdrawal_hash, guid));
                }
            }
        }

        let initiated = self
            .l2_transaction_hashes(withdrawals.iter().map(|w| w.initiated_l2_event_guid).collect())
            .await?;
        let l1_guids = withdrawals
            .iter()
            .filter_map(|w| w.finalized_l1_event_guid)
            .chain(proven_guids.iter().map(|(_, guid)| *guid))
            .collect();
        let l1_hashes = self.l1_transaction_hashes(l1_guids).await?;
        let proven: HashMap<B256, Uuid> = proven_guids.into_iter().collect();

        Ok(withdrawals
            .into_iter()
            .map(|withdrawal| BridgeWithdrawalWithTransactionHashes {
                l2_transaction_hash: initiated
                    .get(&withdrawal.initiated_l2_event_guid)
                    .copied()
                    .unwrap_or_default(),
                proven_l1_transaction_hash: proven
                    .get(&withdrawal.withdrawal_hash)
                    .and_then(|guid| l1_hashes.get(guid))
                    .copied(),
                finalized_l1_transaction_hash: withdrawal
                    .finalized_l1_event_guid
                    .and_then(|guid| l1_hashes.get(&guid).copied()),
                withdrawal,
            })
            .collect())
    }

    /// Returns the transaction hashes of the L1 contract events with the
    /// provided GUIDs.
    async fn l1_transaction_hashes(
        &self,
        guids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, B256>, DatabaseError> {
        if guids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(models::l1_contract_event::Entity::find()
            .filter(models::l1_contract_event::Column::Guid.is_in(guids))
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(|model| {
                let event = ContractEventMeta::from(model);
                (event.guid, event.transaction_hash)
            })
            .collect())
    }

    /// Returns the transaction hashes of the L2 contract events with the
    /// provided GUIDs.
    async fn l2_transaction_hashes(
        &self,
        guids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, B256>, DatabaseError> {
        if guids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(models::l2_contract_event::Entity::find()
            .filter(models::l2_contract_event::Column::Guid.is_in(guids))
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(|model| {
                let event = ContractEventMeta::from(model);
                (event.guid, event.transaction_hash)
            })
            .collect())
    }
}

impl<T: DatabaseConnectionProvider + Sync> DatabaseOperations for T {}
