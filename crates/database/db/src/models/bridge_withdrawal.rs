use alloy_primitives::{Address, Bytes, B256, U256};
use bridge_indexer_primitives::{
    BridgeMessage, BridgeWithdrawal, CrossChainTransaction, TokenPair,
};
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a standard-bridge withdrawal. The
/// embedded transaction and token pair are flattened into the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bridge_withdrawals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    guid: Uuid,
    initiated_l2_event_guid: Uuid,
    cross_domain_messenger_nonce: Vec<u8>,
    withdrawal_hash: Vec<u8>,
    finalized_l1_event_guid: Option<Uuid>,
    from_address: Vec<u8>,
    to_address: Vec<u8>,
    amount: Vec<u8>,
    data: Vec<u8>,
    timestamp: i64,
    l1_token_address: Vec<u8>,
    l2_token_address: Vec<u8>,
}

/// The relation for the bridge withdrawal model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the bridge withdrawal model.
impl ActiveModelBehavior for ActiveModel {}

impl From<BridgeWithdrawal> for ActiveModel {
    fn from(value: BridgeWithdrawal) -> Self {
        Self {
            guid: ActiveValue::Set(value.guid),
            initiated_l2_event_guid: ActiveValue::Set(value.initiated_l2_event_guid),
            cross_domain_messenger_nonce: ActiveValue::Set(
                value.message.nonce.to_be_bytes::<32>().to_vec(),
            ),
            withdrawal_hash: ActiveValue::Set(value.withdrawal_hash.to_vec()),
            finalized_l1_event_guid: ActiveValue::Set(value.finalized_l1_event_guid),
            from_address: ActiveValue::Set(value.tx.from_address.to_vec()),
            to_address: ActiveValue::Set(value.tx.to_address.to_vec()),
            amount: ActiveValue::Set(value.tx.amount.to_be_bytes::<32>().to_vec()),
            data: ActiveValue::Set(value.tx.data.to_vec()),
            timestamp: ActiveValue::Set(value.tx.timestamp as i64),
            l1_token_address: ActiveValue::Set(value.token_pair.l1_token_address.to_vec()),
            l2_token_address: ActiveValue::Set(value.token_pair.l2_token_address.to_vec()),
        }
    }
}

impl From<Model> for BridgeWithdrawal {
    fn from(value: Model) -> Self {
        Self {
            guid: value.guid,
            initiated_l2_event_guid: value.initiated_l2_event_guid,
            message: BridgeMessage {
                nonce: U256::from_be_slice(&value.cross_domain_messenger_nonce),
            },
            withdrawal_hash: B256::from_slice(&value.withdrawal_hash),
            finalized_l1_event_guid: value.finalized_l1_event_guid,
            tx: CrossChainTransaction {
                from_address: Address::from_slice(&value.from_address),
                to_address: Address::from_slice(&value.to_address),
                amount: U256::from_be_slice(&value.amount),
                data: Bytes::from(value.data),
                timestamp: value.timestamp as u64,
            },
            token_pair: TokenPair {
                l1_token_address: Address::from_slice(&value.l1_token_address),
                l2_token_address: Address::from_slice(&value.l2_token_address),
            },
        }
    }
}
