//! The per-chain processors and the cross-chain correlation logic of the
//! bridge indexer.

mod batch;
pub use batch::{EventBatch, ProcessedEvent};

mod driver;
pub use driver::{PauseHandle, Processor, ProcessorConfig};

mod error;
pub use error::ProcessorError;

mod handler;
pub use handler::BatchHandler;

mod l1;
pub use l1::L1Handler;

mod l2;
pub use l2::L2Handler;

mod metrics;
pub use metrics::ProcessorMetrics;

mod supervisor;
pub use supervisor::Supervisor;
