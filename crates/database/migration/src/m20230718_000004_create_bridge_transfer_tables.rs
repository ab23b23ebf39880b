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
                    .table(BridgeDeposits::Table)
                    .if_not_exists()
                    .col(uuid(BridgeDeposits::Guid).primary_key())
                    .col(uuid(BridgeDeposits::InitiatedL1EventGuid))
                    .col(binary_len(BridgeDeposits::CrossDomainMessengerNonce, 32))
                    .col(binary_len(BridgeDeposits::DepositHash, 32))
                    .col(uuid_null(BridgeDeposits::FinalizedL2EventGuid))
                    .col(binary_len(BridgeDeposits::FromAddress, 20))
                    .col(binary_len(BridgeDeposits::ToAddress, 20))
                    .col(binary_len(BridgeDeposits::Amount, 32))
                    .col(blob(BridgeDeposits::Data))
                    .col(big_integer(BridgeDeposits::Timestamp))
                    .col(binary_len(BridgeDeposits::L1TokenAddress, 20))
                    .col(binary_len(BridgeDeposits::L2TokenAddress, 20))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bridge_deposits_nonce")
                    .table(BridgeDeposits::Table)
                    .col(BridgeDeposits::CrossDomainMessengerNonce)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bridge_deposits_from_address_timestamp")
                    .table(BridgeDeposits::Table)
                    .col(BridgeDeposits::FromAddress)
                    .col(BridgeDeposits::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BridgeWithdrawals::Table)
                    .if_not_exists()
                    .col(uuid(BridgeWithdrawals::Guid).primary_key())
                    .col(uuid(BridgeWithdrawals::InitiatedL2EventGuid))
                    .col(binary_len(BridgeWithdrawals::CrossDomainMessengerNonce, 32))
                    .col(binary_len(BridgeWithdrawals::WithdrawalHash, 32))
                    .col(uuid_null(BridgeWithdrawals::FinalizedL1EventGuid))
                    .col(binary_len(BridgeWithdrawals::FromAddress, 20))
                    .col(binary_len(BridgeWithdrawals::ToAddress, 20))
                    .col(binary_len(BridgeWithdrawals::Amount, 32))
                    .col(blob(BridgeWithdrawals::Data))
                    .col(big_integer(BridgeWithdrawals::Timestamp))
                    .col(binary_len(BridgeWithdrawals::L1TokenAddress, 20))
                    .col(binary_len(BridgeWithdrawals::L2TokenAddress, 20))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bridge_withdrawals_nonce")
                    .table(BridgeWithdrawals::Table)
                    .col(BridgeWithdrawals::CrossDomainMessengerNonce)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bridge_withdrawals_from_address_timestamp")
                    .table(BridgeWithdrawals::Table)
                    .col(BridgeWithdrawals::FromAddress)
                    .col(BridgeWithdrawals::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    #[allow(elided_lifetimes_in_paths)]
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BridgeWithdrawals::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(BridgeDeposits::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BridgeDeposits {
    Table,
    Guid,
    InitiatedL1EventGuid,
    CrossDomainMessengerNonce,
    DepositHash,
    FinalizedL2EventGuid,
    FromAddress,
    ToAddress,
    Amount,
    Data,
    Timestamp,
    L1TokenAddress,
    L2TokenAddress,
}

#[derive(DeriveIden)]
enum BridgeWithdrawals {
    Table,
    Guid,
    InitiatedL2EventGuid,
    CrossDomainMessengerNonce,
    WithdrawalHash,
    FinalizedL1EventGuid,
    FromAddress,
    ToAddress,
    Amount,
    Data,
    Timestamp,
    L1TokenAddress,
    L2TokenAddress,
}
