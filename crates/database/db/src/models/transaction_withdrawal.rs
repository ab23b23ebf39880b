use alloy_primitives::{Address, Bytes, B256, U256};
use bridge_indexer_primitives::{CrossChainTransaction, TransactionWithdrawal};
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a message-passer transaction withdrawal.
/// The proven and finalized event references start out null and are set as
/// the withdrawal advances on the L1.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_withdrawals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    withdrawal_hash: Vec<u8>,
    initiated_l2_event_guid: Uuid,
    nonce: Vec<u8>,
    from_address: Vec<u8>,
    to_address: Vec<u8>,
    amount: Vec<u8>,
    data: Vec<u8>,
    timestamp: i64,
    gas_limit: Vec<u8>,
    proven_l1_event_guid: Option<Uuid>,
    finalized_l1_event_guid: Option<Uuid>,
}

/// The relation for the transaction withdrawal model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the transaction withdrawal model.
impl ActiveModelBehavior for ActiveModel {}

impl From<TransactionWithdrawal> for ActiveModel {
    fn from(value: TransactionWithdrawal) -> Self {
        Self {
            withdrawal_hash: ActiveValue::Set(value.withdrawal_hash.to_vec()),
            initiated_l2_event_guid: ActiveValue::Set(value.initiated_l2_event_guid),
            nonce: ActiveValue::Set(value.nonce.to_be_bytes::<32>().to_vec()),
            from_address: ActiveValue::Set(value.tx.from_address.to_vec()),
            to_address: ActiveValue::Set(value.tx.to_address.to_vec()),
            amount: ActiveValue::Set(value.tx.amount.to_be_bytes::<32>().to_vec()),
            data: ActiveValue::Set(value.tx.data.to_vec()),
            timestamp: ActiveValue::Set(value.tx.timestamp as i64),
            gas_limit: ActiveValue::Set(value.gas_limit.to_be_bytes::<32>().to_vec()),
            proven_l1_event_guid: ActiveValue::Set(value.proven_l1_event_guid),
            finalized_l1_event_guid: ActiveValue::Set(value.finalized_l1_event_guid),
        }
    }
}

impl From<Model> for TransactionWithdrawal {
    fn from(value: Model) -> Self {
        Self {
            withdrawal_hash: B256::from_slice(&value.withdrawal_hash),
            initiated_l2_event_guid: value.initiated_l2_event_guid,
            nonce: U256::from_be_slice(&value.nonce),
            tx: CrossChainTransaction {
                from_address: Address::from_slice(&value.from_address),
                to_address: Address::from_slice(&value.to_address),
                amount: U256::from_be_slice(&value.amount),
                data: Bytes::from(value.data),
                timestamp: value.timestamp as u64,
            },
            gas_limit: U256::from_be_slice(&value.gas_limit),
            proven_l1_event_guid: value.proven_l1_event_guid,
            finalized_l1_event_guid: value.finalized_l1_event_guid,
        }
    }
}
