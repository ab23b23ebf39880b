use super::{transaction::DatabaseTransaction, DatabaseConnectionProvider};
use crate::error::DatabaseError;

use sea_orm::{Database as SeaOrmDatabase, DatabaseConnection, TransactionTrait};

/// The [`Database`] struct is responsible for interacting with the database.
///
/// The [`Database`] type wraps a [`sea_orm::DatabaseConnection`]. We implement
/// [`DatabaseConnectionProvider`] for [`Database`] such that it can be used to perform the
/// operations defined in [`crate::DatabaseOperations`]. Atomic operations can be performed using
/// the [`Database::tx`] method which returns a [`DatabaseTransaction`] that also implements the
/// [`DatabaseConnectionProvider`] trait and the [`crate::DatabaseOperations`] trait.
#[derive(Debug)]
pub struct Database {
    /// The underlying database connection.
    connection: DatabaseConnection,
}

impl Database {
    /// Creates a new [`Database`] instance associated with the provided database URL.
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let connection = SeaOrmDatabase::connect(database_url).await?;
        Ok(Self { connection })
    }

    /// Creates a new [`DatabaseTransaction`] which can be used for atomic operations.
    pub async fn tx(&self) -> Result<DatabaseTransaction, DatabaseError> {
        Ok(DatabaseTransaction::new(self.connection.begin().await?))
    }

    /// Returns a reference to the underlying [`DatabaseConnection`].
    pub const fn inner(&self) -> &DatabaseConnection {
        &self.connection
    }
}

impl DatabaseConnectionProvider for Database {
    fn get_connection(&self) -> &(impl sea_orm::ConnectionTrait + sea_orm::StreamTrait) {
        &self.connection
    }
}

impl From<DatabaseConnection> for Database {
    fn from(connection: DatabaseConnection) -> Self {
        Self { connection }
    }
}

#[cfg(test)]
mod test {
    use crate::{operations::DatabaseOperations, test_utils::setup_test_db, DatabaseError};

    use alloy_primitives::{Address, Bytes, B256, U256};
    use arbitrary::{Arbitrary, Unstructured};
    use bridge_indexer_primitives::{
        BlockHeaderInfo, BridgeDeposit, BridgeMessage, BridgeWithdrawal, ContractEventMeta,
        CrossChainTransaction, TokenPair, TransactionWithdrawal,
    };
    use rand::Rng;
    use uuid::Uuid;

    fn unstructured_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 1024];
        rand::rng().fill(bytes.as_mut_slice());
        bytes
    }

    fn transaction(from: Address, timestamp: u64) -> CrossChainTransaction {
        CrossChainTransaction {
            from_address: from,
            to_address: Address::random(),
            amount: U256::from(10u64.pow(18)),
            data: Bytes::from_static(&[0x01]),
            timestamp,
        }
    }

    fn withdrawal(hash: B256, initiated: Uuid) -> TransactionWithdrawal {
        TransactionWithdrawal {
            withdrawal_hash: hash,
            initiated_l2_event_guid: initiated,
            nonce: U256::from(1),
            tx: transaction(Address::random(), 1),
            gas_limit: U256::from(200_000),
            proven_l1_event_guid: None,
            finalized_l1_event_guid: None,
        }
    }

    #[tokio::test]
    async fn test_database_round_trip_block_headers() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        // Generate two random headers with known ordering.
        let mut low = BlockHeaderInfo::arbitrary(&mut u).unwrap();
        let mut high = BlockHeaderInfo::arbitrary(&mut u).unwrap();
        low.number = 10;
        high.number = 11;

        // Round trip the headers through the database.
        db.insert_l1_block_headers(vec![low, high]).await.unwrap();
        let latest = db.latest_l1_block_header().await.unwrap().unwrap();
        assert_eq!(latest, high);

        // The L2 table is independent.
        assert!(db.latest_l2_block_header().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_database_round_trip_contract_event() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        // Generate a random contract event.
        let event = ContractEventMeta::arbitrary(&mut u).unwrap();

        // Round trip the event through the database.
        db.insert_l2_contract_events(vec![event.clone()]).await.unwrap();
        let event_from_db = db.l2_contract_event(event.guid).await.unwrap().unwrap();
        assert_eq!(event, event_from_db);
    }

    #[tokio::test]
    async fn test_database_idempotent_reinsertion() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        let header = BlockHeaderInfo::arbitrary(&mut u).unwrap();
        let mut event = ContractEventMeta::arbitrary(&mut u).unwrap();
        event.block_hash = header.hash;

        // Re-inserting the same rows leaves the database unchanged.
        db.insert_l1_block_headers(vec![header]).await.unwrap();
        db.insert_l1_contract_events(vec![event.clone()]).await.unwrap();
        db.insert_l1_block_headers(vec![header]).await.unwrap();
        db.insert_l1_contract_events(vec![event.clone()]).await.unwrap();

        assert_eq!(db.latest_l1_block_header().await.unwrap().unwrap(), header);
        assert_eq!(db.l1_contract_event(event.guid).await.unwrap().unwrap(), event);
    }

    #[tokio::test]
    async fn test_database_withdrawal_prove_then_finalize() {
        // Set up the test database.
        let db = setup_test_db().await;

        let hash = B256::random();
        db.insert_transaction_withdrawals(vec![withdrawal(hash, Uuid::new_v4())]).await.unwrap();

        // Prove, then finalize.
        let proven = Uuid::new_v4();
        let finalized = Uuid::new_v4();
        db.mark_transaction_withdrawal_proven(hash, proven).await.unwrap();
        db.mark_transaction_withdrawal_finalized(hash, finalized).await.unwrap();

        let withdrawal = db.transaction_withdrawal_by_hash(hash).await.unwrap().unwrap();
        assert_eq!(withdrawal.proven_l1_event_guid, Some(proven));
        assert_eq!(withdrawal.finalized_l1_event_guid, Some(finalized));
    }

    #[tokio::test]
    async fn test_database_rejects_finalize_before_prove() {
        // Set up the test database.
        let db = setup_test_db().await;

        let hash = B256::random();
        db.insert_transaction_withdrawals(vec![withdrawal(hash, Uuid::new_v4())]).await.unwrap();

        // Finalizing an unproven withdrawal violates the lifecycle invariant.
        let err = db.mark_transaction_withdrawal_finalized(hash, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::FinalizedBeforeProven(h) if h == hash));
    }

    #[tokio::test]
    async fn test_database_rejects_prove_of_missing_withdrawal() {
        // Set up the test database.
        let db = setup_test_db().await;

        let hash = B256::random();
        let err = db.mark_transaction_withdrawal_proven(hash, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::WithdrawalNotFound(h) if h == hash));
    }

    #[tokio::test]
    async fn test_database_bridge_deposits_by_address() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        let alice = Address::random();
        let initiated = ContractEventMeta::arbitrary(&mut u).unwrap();
        let finalized = ContractEventMeta::arbitrary(&mut u).unwrap();

        let deposit = BridgeDeposit {
            guid: Uuid::new_v4(),
            initiated_l1_event_guid: initiated.guid,
            message: BridgeMessage { nonce: U256::from(7) },
            deposit_hash: B256::random(),
            finalized_l2_event_guid: None,
            tx: transaction(alice, 100),
            token_pair: TokenPair::default(),
        };

        db.insert_l1_contract_events(vec![initiated.clone()]).await.unwrap();
        db.insert_bridge_deposits(vec![deposit.clone()]).await.unwrap();

        // Before finalization the L2 hash is absent.
        let rows = db.bridge_deposits_by_address(alice).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].l1_transaction_hash, initiated.transaction_hash);
        assert_eq!(rows[0].finalized_l2_transaction_hash, None);

        // After finalization the joined L2 hash materializes.
        db.insert_l2_contract_events(vec![finalized.clone()]).await.unwrap();
        db.mark_bridge_deposit_finalized(deposit.guid, finalized.guid).await.unwrap();
        let rows = db.bridge_deposits_by_address(alice).await.unwrap();
        assert_eq!(rows[0].finalized_l2_transaction_hash, Some(finalized.transaction_hash));

        // An unrelated address sees nothing.
        assert!(db.bridge_deposits_by_address(Address::random()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_database_bridge_withdrawals_by_address() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        let alice = Address::random();
        let withdrawal_hash = B256::random();
        let initiated = ContractEventMeta::arbitrary(&mut u).unwrap();
        let proven = ContractEventMeta::arbitrary(&mut u).unwrap();
        let finalized = ContractEventMeta::arbitrary(&mut u).unwrap();

        let bridge_withdrawal = BridgeWithdrawal {
            guid: Uuid::new_v4(),
            initiated_l2_event_guid: initiated.guid,
            message: BridgeMessage { nonce: U256::from(9) },
            withdrawal_hash,
            finalized_l1_event_guid: None,
            tx: transaction(alice, 100),
            token_pair: TokenPair::default(),
        };

        db.insert_l2_contract_events(vec![initiated.clone()]).await.unwrap();
        db.insert_transaction_withdrawals(vec![withdrawal(withdrawal_hash, initiated.guid)])
            .await
            .unwrap();
        db.insert_bridge_withdrawals(vec![bridge_withdrawal.clone()]).await.unwrap();

        // Only the initiating hash is available before the L1 steps.
        let rows = db.bridge_withdrawals_by_address(alice).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].l2_transaction_hash, initiated.transaction_hash);
        assert_eq!(rows[0].proven_l1_transaction_hash, None);
        assert_eq!(rows[0].finalized_l1_transaction_hash, None);

        // Prove, then finalize on the L1.
        db.insert_l1_contract_events(vec![proven.clone(), finalized.clone()]).await.unwrap();
        db.mark_transaction_withdrawal_proven(withdrawal_hash, proven.guid).await.unwrap();
        db.mark_transaction_withdrawal_finalized(withdrawal_hash, finalized.guid).await.unwrap();
        db.mark_bridge_withdrawal_finalized(bridge_withdrawal.guid, finalized.guid).await.unwrap();

        let rows = db.bridge_withdrawals_by_address(alice).await.unwrap();
        assert_eq!(rows[0].proven_l1_transaction_hash, Some(proven.transaction_hash));
        assert_eq!(rows[0].finalized_l1_transaction_hash, Some(finalized.transaction_hash));

        // The by-nonce lookups observe the same row.
        let by_nonce = db.bridge_withdrawal_by_message_nonce(U256::from(9)).await.unwrap();
        assert_eq!(by_nonce.map(|w| w.guid), Some(bridge_withdrawal.guid));
        let latest = db.latest_bridge_withdrawal_message_nonce().await.unwrap();
        assert_eq!(latest, Some(U256::from(9)));
    }

    #[tokio::test]
    async fn test_database_latest_bridge_deposit_nonce() {
        // Set up the test database.
        let db = setup_test_db().await;

        assert_eq!(db.latest_bridge_deposit_message_nonce().await.unwrap(), None);

        for nonce in [3u64, 7, 5] {
            let deposit = BridgeDeposit {
                guid: Uuid::new_v4(),
                initiated_l1_event_guid: Uuid::new_v4(),
                message: BridgeMessage { nonce: U256::from(nonce) },
                deposit_hash: B256::random(),
                finalized_l2_event_guid: None,
                tx: transaction(Address::random(), nonce),
                token_pair: TokenPair::default(),
            };
            db.insert_bridge_deposits(vec![deposit]).await.unwrap();
        }

        let latest = db.latest_bridge_deposit_message_nonce().await.unwrap();
        assert_eq!(latest, Some(U256::from(7)));
    }

    #[tokio::test]
    async fn test_database_tx() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let bytes = unstructured_bytes();
        let mut u = Unstructured::new(&bytes);

        let header = BlockHeaderInfo::arbitrary(&mut u).unwrap();

        // A rolled back transaction leaves no trace.
        let tx = db.tx().await.unwrap();
        tx.insert_l2_block_headers(vec![header]).await.unwrap();
        tx.rollback().await.unwrap();
        assert!(db.latest_l2_block_header().await.unwrap().is_none());

        // A committed transaction persists.
        let tx = db.tx().await.unwrap();
        tx.insert_l2_block_headers(vec![header]).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(db.latest_l2_block_header().await.unwrap().unwrap(), header);
    }
}
