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
                    .table(TransactionDeposits::Table)
                    .if_not_exists()
                    .col(binary_len(TransactionDeposits::DepositHash, 32).primary_key())
                    .col(uuid(TransactionDeposits::InitiatedL1EventGuid))
                    .col(binary_len(TransactionDeposits::Version, 32))
                    .col(blob(TransactionDeposits::OpaqueData))
                    .col(binary_len(TransactionDeposits::FromAddress, 20))
                    .col(binary_len(TransactionDeposits::ToAddress, 20))
                    .col(binary_len(TransactionDeposits::Amount, 32))
                    .col(blob(TransactionDeposits::Data))
                    .col(big_integer(TransactionDeposits::Timestamp))
                    .col(binary_len(TransactionDeposits::GasLimit, 32))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionWithdrawals::Table)
                    .if_not_exists()
                    .col(binary_len(TransactionWithdrawals::WithdrawalHash, 32).primary_key())
                    .col(uuid(TransactionWithdrawals::InitiatedL2EventGuid))
                    .col(binary_len(TransactionWithdrawals::Nonce, 32))
                    .col(binary_len(TransactionWithdrawals::FromAddress, 20))
                    .col(binary_len(TransactionWithdrawals::ToAddress, 20))
                    .col(binary_len(TransactionWithdrawals::Amount, 32))
                    .col(blob(TransactionWithdrawals::Data))
                    .col(big_integer(TransactionWithdrawals::Timestamp))
                    .col(binary_len(TransactionWithdrawals::GasLimit, 32))
                    .col(uuid_null(TransactionWithdrawals::ProvenL1EventGuid))
                    .col(uuid_null(TransactionWithdrawals::FinalizedL1EventGuid))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    #[allow(elided_lifetimes_in_paths)]
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TransactionWithdrawals::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TransactionDeposits::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TransactionDeposits {
    Table,
    DepositHash,
    InitiatedL1EventGuid,
    Version,
    OpaqueData,
    FromAddress,
    ToAddress,
    Amount,
    Data,
    Timestamp,
    GasLimit,
}

#[derive(DeriveIden)]
enum TransactionWithdrawals {
    Table,
    WithdrawalHash,
    InitiatedL2EventGuid,
    Nonce,
    FromAddress,
    ToAddress,
    Amount,
    Data,
    Timestamp,
    GasLimit,
    ProvenL1EventGuid,
    FinalizedL1EventGuid,
}
