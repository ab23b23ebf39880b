use alloy_primitives::{Bytes, B256};
use bridge_indexer_primitives::ContractEventMeta;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents an L1 contract event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l1_contract_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    guid: Uuid,
    block_hash: Vec<u8>,
    transaction_hash: Vec<u8>,
    log_index: i64,
    signature: Vec<u8>,
    data: Vec<u8>,
    timestamp: i64,
}

/// The relation for the L1 contract event model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L1 contract event model.
impl ActiveModelBehavior for ActiveModel {}

impl From<ContractEventMeta> for ActiveModel {
    fn from(value: ContractEventMeta) -> Self {
        Self {
            guid: ActiveValue::Set(value.guid),
            block_hash: ActiveValue::Set(value.block_hash.to_vec()),
            transaction_hash: ActiveValue::Set(value.transaction_hash.to_vec()),
            log_index: ActiveValue::Set(value.log_index as i64),
            signature: ActiveValue::Set(value.signature.to_vec()),
            data: ActiveValue::Set(value.data.to_vec()),
            timestamp: ActiveValue::Set(value.timestamp as i64),
        }
    }
}

impl From<Model> for ContractEventMeta {
    fn from(value: Model) -> Self {
        Self {
            guid: value.guid,
            block_hash: B256::from_slice(&value.block_hash),
            transaction_hash: B256::from_slice(&value.transaction_hash),
            log_index: value.log_index as u64,
            signature: B256::from_slice(&value.signature),
            data: Bytes::from(value.data),
            timestamp: value.timestamp as u64,
        }
    }
}
