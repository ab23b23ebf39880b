use crate::{EventBatch, ProcessorError};

use alloy_primitives::Address;
use bridge_indexer_db::{Database, DatabaseTransaction};
use bridge_indexer_primitives::{BlockHeaderInfo, Chain};

/// The chain-specific half of a processor: which contracts to watch and how
/// to fold one batch of decoded events into the database.
#[async_trait::async_trait]
pub trait BatchHandler: Send + Sync {
    /// The chain the handler indexes.
    fn chain(&self) -> Chain;

    /// The ordered list of contract addresses to filter logs by.
    fn addresses(&self) -> Vec<Address>;

    /// The header the chain's cursor resumes from, recovered from previously
    /// indexed state.
    async fn latest_indexed_header(
        &self,
        db: &Database,
    ) -> Result<Option<BlockHeaderInfo>, ProcessorError>;

    /// Folds the batch into the database. Runs entirely within the provided
    /// transaction; the driver commits on success and rolls back on error.
    async fn process_batch(
        &self,
        tx: &DatabaseTransaction,
        batch: &EventBatch,
    ) -> Result<(), ProcessorError>;
}
