use alloy_primitives::{B256, U256};
use bridge_indexer_primitives::OutputProposal;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents an L2 output proposal observed on the L1.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "output_proposals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    output_root: Vec<u8>,
    l2_output_index: Vec<u8>,
    l2_block_number: i64,
    l1_contract_event_guid: Uuid,
}

/// The relation for the output proposal model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the output proposal model.
impl ActiveModelBehavior for ActiveModel {}

impl From<OutputProposal> for ActiveModel {
    fn from(value: OutputProposal) -> Self {
        Self {
            output_root: ActiveValue::Set(value.output_root.to_vec()),
            l2_output_index: ActiveValue::Set(value.l2_output_index.to_be_bytes::<32>().to_vec()),
            l2_block_number: ActiveValue::Set(value.l2_block_number as i64),
            l1_contract_event_guid: ActiveValue::Set(value.l1_contract_event_guid),
        }
    }
}

impl From<Model> for OutputProposal {
    fn from(value: Model) -> Self {
        Self {
            output_root: B256::from_slice(&value.output_root),
            l2_output_index: U256::from_be_slice(&value.l2_output_index),
            l2_block_number: value.l2_block_number as u64,
            l1_contract_event_guid: value.l1_contract_event_guid,
        }
    }
}
