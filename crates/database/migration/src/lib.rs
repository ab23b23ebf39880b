//! The database migrations for the bridge indexer.

pub use sea_orm_migration::prelude::*;

mod m20230712_000001_create_block_header_tables;
mod m20230712_000002_create_contract_event_tables;
mod m20230714_000003_create_bridge_transaction_tables;
mod m20230718_000004_create_bridge_transfer_tables;

/// The migrator for the bridge indexer schema.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230712_000001_create_block_header_tables::Migration),
            Box::new(m20230712_000002_create_contract_event_tables::Migration),
            Box::new(m20230714_000003_create_bridge_transaction_tables::Migration),
            Box::new(m20230718_000004_create_bridge_transfer_tables::Migration),
        ]
    }
}
