use crate::{BatchHandler, Processor, ProcessorError};

use bridge_indexer_client::ChainClient;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs the two per-chain processors as independent cooperating tasks.
///
/// The supervisor is stateless: it spawns both processors, and when either
/// returns a fatal error it cancels the other and propagates the first error
/// to the caller.
#[derive(Debug)]
pub struct Supervisor<C1, H1, C2, H2> {
    l1: Processor<C1, H1>,
    l2: Processor<C2, H2>,
}

impl<C1, H1, C2, H2> Supervisor<C1, H1, C2, H2>
where
    C1: ChainClient + 'static,
    H1: BatchHandler + 'static,
    C2: ChainClient + 'static,
    H2: BatchHandler + 'static,
{
    /// Returns a new [`Supervisor`] over the two processors.
    pub const fn new(l1: Processor<C1, H1>, l2: Processor<C2, H2>) -> Self {
        Self { l1, l2 }
    }

    /// Runs both processors until one fails fatally or the provided token is
    /// cancelled.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ProcessorError> {
        let mut tasks = JoinSet::new();
        tasks.spawn(self.l1.run(cancel.child_token()));
        tasks.spawn(self.l2.run(cancel.child_token()));

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::error!(target: "indexer::supervisor", ?err, "processor failed, shutting down");
                    cancel.cancel();
                    first_error.get_or_insert(err);
                }
                Err(join_err) => {
                    tracing::error!(target: "indexer::supervisor", ?join_err, "processor task panicked, shutting down");
                    cancel.cancel();
                    first_error.get_or_insert(join_err.into());
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
