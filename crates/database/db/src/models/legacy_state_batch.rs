use alloy_primitives::B256;
use bridge_indexer_primitives::LegacyStateBatch;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a legacy state commitment batch observed
/// on the L1.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "legacy_state_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    index: i64,
    root: Vec<u8>,
    size: i64,
    prev_total: i64,
    l1_contract_event_guid: Uuid,
}

/// The relation for the legacy state batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the legacy state batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<LegacyStateBatch> for ActiveModel {
    fn from(value: LegacyStateBatch) -> Self {
        Self {
            index: ActiveValue::Set(value.index as i64),
            root: ActiveValue::Set(value.root.to_vec()),
            size: ActiveValue::Set(value.size as i64),
            prev_total: ActiveValue::Set(value.prev_total as i64),
            l1_contract_event_guid: ActiveValue::Set(value.l1_contract_event_guid),
        }
    }
}

impl From<Model> for LegacyStateBatch {
    fn from(value: Model) -> Self {
        Self {
            index: value.index as u64,
            root: B256::from_slice(&value.root),
            size: value.size as u64,
            prev_total: value.prev_total as u64,
            l1_contract_event_guid: value.l1_contract_event_guid,
        }
    }
}
