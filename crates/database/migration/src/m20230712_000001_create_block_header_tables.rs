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
                    .table(L1BlockHeaders::Table)
                    .if_not_exists()
                    .col(binary_len(L1BlockHeaders::Hash, 32).primary_key())
                    .col(binary_len(L1BlockHeaders::ParentHash, 32))
                    .col(big_integer(L1BlockHeaders::Number))
                    .col(big_integer(L1BlockHeaders::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_l1_block_headers_number")
                    .table(L1BlockHeaders::Table)
                    .col(L1BlockHeaders::Number)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(L2BlockHeaders::Table)
                    .if_not_exists()
                    .col(binary_len(L2BlockHeaders::Hash, 32).primary_key())
                    .col(binary_len(L2BlockHeaders::ParentHash, 32))
                    .col(big_integer(L2BlockHeaders::Number))
                    .col(big_integer(L2BlockHeaders::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_l2_block_headers_number")
                    .table(L2BlockHeaders::Table)
                    .col(L2BlockHeaders::Number)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OutputProposals::Table)
                    .if_not_exists()
                    .col(binary_len(OutputProposals::OutputRoot, 32).primary_key())
                    .col(binary_len(OutputProposals::L2OutputIndex, 32))
                    .col(big_integer(OutputProposals::L2BlockNumber))
                    .col(uuid(OutputProposals::L1ContractEventGuid))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LegacyStateBatches::Table)
                    .if_not_exists()
                    .col(big_integer(LegacyStateBatches::Index).primary_key())
                    .col(binary_len(LegacyStateBatches::Root, 32))
                    .col(big_integer(LegacyStateBatches::Size))
                    .col(big_integer(LegacyStateBatches::PrevTotal))
                    .col(uuid(LegacyStateBatches::L1ContractEventGuid))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    #[allow(elided_lifetimes_in_paths)]
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LegacyStateBatches::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(OutputProposals::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(L2BlockHeaders::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(L1BlockHeaders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum L1BlockHeaders {
    Table,
    Hash,
    ParentHash,
    Number,
    Timestamp,
}

#[derive(DeriveIden)]
enum L2BlockHeaders {
    Table,
    Hash,
    ParentHash,
    Number,
    Timestamp,
}

#[derive(DeriveIden)]
enum OutputProposals {
    Table,
    OutputRoot,
    L2OutputIndex,
    L2BlockNumber,
    L1ContractEventGuid,
}

#[derive(DeriveIden)]
enum LegacyStateBatches {
    Table,
    Index,
    Root,
    Size,
    PrevTotal,
    L1ContractEventGuid,
}
