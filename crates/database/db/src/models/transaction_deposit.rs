use alloy_primitives::{Address, Bytes, B256, U256};
use bridge_indexer_primitives::{CrossChainTransaction, TransactionDeposit};
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a portal transaction deposit. The
/// embedded transaction is flattened into the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_deposits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    deposit_hash: Vec<u8>,
    initiated_l1_event_guid: Uuid,
    version: Vec<u8>,
    opaque_data: Vec<u8>,
    from_address: Vec<u8>,
    to_address: Vec<u8>,
    amount: Vec<u8>,
    data: Vec<u8>,
    timestamp: i64,
    gas_limit: Vec<u8>,
}

/// The relation for the transaction deposit model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the transaction deposit model.
impl ActiveModelBehavior for ActiveModel {}

impl From<TransactionDeposit> for ActiveModel {
    fn from(value: TransactionDeposit) -> Self {
        Self {
            deposit_hash: ActiveValue::Set(value.deposit_hash.to_vec()),
            initiated_l1_event_guid: ActiveValue::Set(value.initiated_l1_event_guid),
            version: ActiveValue::Set(value.version.to_be_bytes::<32>().to_vec()),
            opaque_data: ActiveValue::Set(value.opaque_data.to_vec()),
            from_address: ActiveValue::Set(value.tx.from_address.to_vec()),
            to_address: ActiveValue::Set(value.tx.to_address.to_vec()),
            amount: ActiveValue::Set(value.tx.amount.to_be_bytes::<32>().to_vec()),
            data: ActiveValue::Set(value.tx.data.to_vec()),
            timestamp: ActiveValue::Set(value.tx.timestamp as i64),
            gas_limit: ActiveValue::Set(value.gas_limit.to_be_bytes::<32>().to_vec()),
        }
    }
}

impl From<Model> for TransactionDeposit {
    fn from(value: Model) -> Self {
        Self {
            deposit_hash: B256::from_slice(&value.deposit_hash),
            initiated_l1_event_guid: value.initiated_l1_event_guid,
            version: U256::from_be_slice(&value.version),
            opaque_data: Bytes::from(value.opaque_data),
            tx: CrossChainTransaction {
                from_address: Address::from_slice(&value.from_address),
                to_address: Address::from_slice(&value.to_address),
                amount: U256::from_be_slice(&value.amount),
                data: Bytes::from(value.data),
                timestamp: value.timestamp as u64,
            },
            gas_limit: U256::from_be_slice(&value.gas_limit),
        }
    }
}
