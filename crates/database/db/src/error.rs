use alloy_primitives::B256;
use uuid::Uuid;

/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    /// A transaction withdrawal expected to be indexed was not found.
    #[error("transaction withdrawal [{0}] not found in database")]
    WithdrawalNotFound(B256),
    /// A bridge deposit expected to be indexed was not found.
    #[error("bridge deposit [{0}] not found in database")]
    BridgeDepositNotFound(Uuid),
    /// A bridge withdrawal expected to be indexed was not found.
    #[error("bridge withdrawal [{0}] not found in database")]
    BridgeWithdrawalNotFound(Uuid),
    /// A withdrawal was finalized without having been proven first.
    #[error("cannot mark unproven withdrawal [{0}] as finalized")]
    FinalizedBeforeProven(B256),
}
