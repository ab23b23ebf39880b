use alloy_primitives::B256;
use bridge_indexer_primitives::BlockHeaderInfo;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents an L2 block header.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l2_block_headers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    hash: Vec<u8>,
    parent_hash: Vec<u8>,
    number: i64,
    timestamp: i64,
}

/// The relation for the L2 block header model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L2 block header model.
impl ActiveModelBehavior for ActiveModel {}

impl From<BlockHeaderInfo> for ActiveModel {
    fn from(value: BlockHeaderInfo) -> Self {
        Self {
            hash: ActiveValue::Set(value.hash.to_vec()),
            parent_hash: ActiveValue::Set(value.parent_hash.to_vec()),
            number: ActiveValue::Set(value.number as i64),
            timestamp: ActiveValue::Set(value.timestamp as i64),
        }
    }
}

impl From<Model> for BlockHeaderInfo {
    fn from(value: Model) -> Self {
        Self {
            hash: B256::from_slice(&value.hash),
            parent_hash: B256::from_slice(&value.parent_hash),
            number: value.number as u64,
            timestamp: value.timestamp as u64,
        }
    }
}
