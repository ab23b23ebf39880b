use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for a [`super::Processor`].
#[derive(Metrics)]
#[metrics(scope = "bridge_indexer_processor")]
pub struct ProcessorMetrics {
    /// A counter on the batches committed.
    pub batches_processed: Counter,
    /// A counter on the headers indexed.
    pub headers_indexed: Counter,
    /// A counter on the contract events indexed.
    pub events_indexed: Counter,
    /// A counter on the batch retries.
    pub retries: Counter,
    /// A histogram of the batch processing duration.
    pub batch_duration: Histogram,
}
