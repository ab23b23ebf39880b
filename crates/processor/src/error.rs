use alloy_primitives::B256;
use bridge_indexer_client::{ClientError, TraversalError};
use bridge_indexer_contracts::DecodeError;
use bridge_indexer_db::DatabaseError;
use bridge_indexer_primitives::Chain;

/// A type that represents an error that occurred in a processor.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// An error occurred while querying the chain.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// An error occurred while traversing the header stream.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    /// An error occurred while interacting with the database.
    #[error(transparent)]
    Database(#[from] DatabaseError),
    /// A log did not decode against the schema its signature announced.
    #[error("failed to decode contract event: {0}")]
    Decode(#[from] DecodeError),
    /// A filtered log references a block hash outside the batched header set.
    #[error("log at index {log_index} references block {block_hash} outside the batch")]
    LogOutsideBatch {
        /// The block hash the log references.
        block_hash: B256,
        /// The index of the log within its block.
        log_index: u64,
    },
    /// A filtered log is missing a field the indexer relies on.
    #[error("log missing the {0} field")]
    MissingLogField(&'static str),
    /// An event references state the peer processor has not indexed yet. The
    /// batch is rolled back and retried after a backoff.
    #[error("waiting for the {chain} processor to catch up: {context}")]
    WaitingForPeer {
        /// The chain whose processor is behind.
        chain: Chain,
        /// The lookup that came up short.
        context: &'static str,
    },
    /// An event references a predecessor that can no longer appear. The
    /// database is missing data it must have, so the processor aborts.
    #[error("missing {entity} [{reference}]")]
    MissingPredecessor {
        /// The kind of record that is missing.
        entity: &'static str,
        /// The identifier the lookup used.
        reference: String,
    },
    /// The checkpoint recovered from the database is not canonical on the
    /// chain anymore.
    #[error("stored checkpoint {0} is not canonical")]
    StaleCheckpoint(B256),
    /// A processor task failed to join.
    #[error("processor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ProcessorError {
    /// Whether the processor should retry the current batch after a backoff
    /// instead of tearing down.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::WaitingForPeer { .. } => true,
            Self::Client(err) => err.is_transient(),
            Self::Traversal(err) => err.is_transient(),
            _ => false,
        }
    }
}
