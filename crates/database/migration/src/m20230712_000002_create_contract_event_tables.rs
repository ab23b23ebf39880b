use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(elided_lifetimes_in_paths)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(L1ContractEvents::Table)
                    .if_not_exists()
                    .col(uuid(L1ContractEvents::Guid).primary_key())
                    .col(binary_len(L1ContractEvents::BlockHash, 32))
                    .col(binary_len(L1ContractEvents::TransactionHash, 32))
                    .col(big_integer(L1ContractEvents::LogIndex))
                    .col(binary_len(L1ContractEvents::Signature, 32))
                    .col(blob(L1ContractEvents::Data))
                    .col(big_integer(L1ContractEvents::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_l1_contract_events_block_hash_log_index")
                    .table(L1ContractEvents::Table)
                    .col(L1ContractEvents::BlockHash)
                    .col(L1ContractEvents::LogIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(L2ContractEvents::Table)
                    .if_not_exists()
                    .col(uuid(L2ContractEvents::Guid).primary_key())
                    .col(binary_len(L2ContractEvents::BlockHash, 32))
                    .col(binary_len(L2ContractEvents::TransactionHash, 32))
                    .col(big_integer(L2ContractEvents::LogIndex))
                    .col(binary_len(L2ContractEvents::Signature, 32))
                    .col(blob(L2ContractEvents::Data))
                    .col(big_integer(L2ContractEvents::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_l2_contract_events_block_hash_log_index")
                    .table(L2ContractEvents::Table)
                    .col(L2ContractEvents::BlockHash)
                    .col(L2ContractEvents::LogIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    #[allow(elided_lifetimes_in_paths)]
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L2ContractEvents::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(L1ContractEvents::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum L1ContractEvents {
    Table,
    Guid,
    BlockHash,
    TransactionHash,
    LogIndex,
    Signature,
    Data,
    Timestamp,
}

#[derive(DeriveIden)]
enum L2ContractEvents {
    Table,
    Guid,
    BlockHash,
    TransactionHash,
    LogIndex,
    Signature,
    Data,
    Timestamp,
}
