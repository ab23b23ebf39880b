use crate::{BatchHandler, EventBatch, ProcessorError, ProcessorMetrics};

use bridge_indexer_client::{ChainClient, HeaderTraversal};
use bridge_indexer_db::Database;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// The configuration of a [`Processor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// The height traversal starts at on a cold start.
    pub start_height: u64,
    /// The maximum number of headers fetched per traversal batch.
    pub max_header_batch: u64,
    /// The sleep between batches once the processor is synced to the head.
    pub poll_interval: Duration,
}

/// Pauses and resumes a processor. Pausing is cooperative: the processor
/// finishes the in-flight batch transaction and blocks before starting the
/// next one, so a paused processor holds no database locks.
#[derive(Debug, Clone)]
pub struct PauseHandle {
    sender: watch::Sender<bool>,
}

impl PauseHandle {
    /// Requests the processor to pause before its next batch.
    pub fn pause(&self) {
        let _ = self.sender.send(true);
    }

    /// Resumes a paused processor.
    pub fn resume(&self) {
        let _ = self.sender.send(false);
    }
}

/// Bounded exponential backoff for retryable batch failures.
#[derive(Debug, Default)]
struct Backoff {
    attempt: u32,
}

impl Backoff {
    const INITIAL_DELAY: Duration = Duration::from_secs(1);
    const MAX_DELAY: Duration = Duration::from_secs(30);

    fn next(&mut self) -> Duration {
        let delay = Self::INITIAL_DELAY
            .saturating_mul(2u32.saturating_pow(self.attempt))
            .min(Self::MAX_DELAY);
        self.attempt += 1;
        delay
    }

    fn reset(&mut self) {
        self.attempt = 0;
    }
}

/// A per-chain processor: drives the header traversal cursor, filters and
/// decodes logs, and folds each batch into the database through its
/// [`BatchHandler`] within a single transaction.
#[derive(Debug)]
pub struct Processor<C, H> {
    /// The chain client.
    client: Arc<C>,
    /// The chain-specific batch handler.
    handler: H,
    /// The reference to the database.
    db: Arc<Database>,
    /// The processor configuration.
    config: ProcessorConfig,
    /// The traversal cursor, recovered from indexed state on the first step.
    traversal: Option<HeaderTraversal<Arc<C>>>,
    /// The receiver side of the pause flag.
    pause_rx: watch::Receiver<bool>,
    /// The sender side of the pause flag, handed out via
    /// [`Processor::pause_handle`].
    pause_tx: watch::Sender<bool>,
    /// The metrics for the processor.
    metrics: ProcessorMetrics,
}

impl<C: ChainClient + 'static, H: BatchHandler> Processor<C, H> {
    /// Creates a new [`Processor`] instance.
    pub fn new(client: C, handler: H, db: Arc<Database>, config: ProcessorConfig) -> Self {
        let (pause_tx, pause_rx) = watch::channel(false);
        Self {
            client: Arc::new(client),
            handler,
            db,
            config,
            traversal: None,
            pause_rx,
            pause_tx,
            metrics: ProcessorMetrics::default(),
        }
    }

    /// Returns a handle to pause and resume the processor.
    pub fn pause_handle(&self) -> PauseHandle {
        PauseHandle { sender: self.pause_tx.clone() }
    }

    /// Main execution loop for the [`Processor`]. Runs until cancelled or
    /// until a fatal error occurs.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), ProcessorError> {
        let chain = self.handler.chain();
        tracing::info!(target: "indexer::processor", %chain, "initializing processor");

        let mut backoff = Backoff::default();
        loop {
            // The pause flag is only honored between batch transactions.
            self.wait_if_paused(&cancel).await;
            if cancel.is_cancelled() {
                return Ok(());
            }

            let stepped = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                res = self.step() => res,
            };

            match stepped {
                Ok(true) => backoff.reset(),
                Ok(false) => {
                    backoff.reset();
                    tokio::select! {
                        _ = cancel.cancelled() => return Ok(()),
                        _ = tokio::time::sleep(self.config.poll_interval) => {}
                    }
                }
                Err(err) if err.is_retryable() => {
                    let delay = backoff.next();
                    self.metrics.retries.increment(1);
                    tracing::warn!(target: "indexer::processor", %chain, ?err, ?delay, "retrying batch");
                    tokio::select! {
                        _ = cancel.cancelled() => return Ok(()),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => {
                    tracing::error!(target: "indexer::processor", %chain, ?err, "fatal processor error");
                    return Err(err);
                }
            }
        }
    }

    /// A step of work for the [`Processor`]: one traversal batch folded into
    /// the database within one transaction. Returns false when the cursor is
    /// at the chain head and the caller should idle.
    pub async fn step(&mut self) -> Result<bool, ProcessorError> {
        if self.traversal.is_none() {
            self.traversal = Some(self.recover_cursor().await?);
        }
        let traversal = self.traversal.as_mut().expect("cursor recovered above");

        let headers = traversal.next_headers(self.config.max_header_batch).await?;
        let Some((first, last)) = headers.first().zip(headers.last()) else {
            return Ok(false);
        };
        let (from, to) = (first.number, last.number);

        let now = Instant::now();
        let logs = self.client.filter_logs(from, to, &self.handler.addresses()).await?;
        let batch = EventBatch::from_logs(self.handler.chain(), headers, logs)?;

        let tx = self.db.tx().await?;
        if let Err(err) = self.handler.process_batch(&tx, &batch).await {
            // Drop the uncommitted writes; the un-advanced cursor re-reads
            // the same batch on the next attempt.
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(target: "indexer::processor", ?rollback_err, "failed to roll back batch transaction");
            }
            return Err(err);
        }
        tx.commit().await?;

        let last = *batch.headers().last().expect("batch is non-empty");
        self.metrics.batches_processed.increment(1);
        self.metrics.headers_indexed.increment(batch.headers().len() as u64);
        self.metrics.events_indexed.increment(batch.events().count() as u64);
        self.metrics.batch_duration.record(now.elapsed().as_secs_f64());
        traversal.advance(last);

        Ok(true)
    }

    /// Recovers the traversal cursor from previously indexed state. The
    /// stored tip must still be canonical on the chain.
    async fn recover_cursor(&self) -> Result<HeaderTraversal<Arc<C>>, ProcessorError> {
        let chain = self.handler.chain();
        let seed = match self.handler.latest_indexed_header(&self.db).await? {
            Some(stored) => {
                tracing::info!(
                    target: "indexer::processor",
                    %chain,
                    height = stored.number,
                    hash = ?stored.hash,
                    "detected last indexed block"
                );
                let header = self
                    .client
                    .block_header_by_hash(stored.hash)
                    .await?
                    .ok_or(ProcessorError::StaleCheckpoint(stored.hash))?;
                Some(header)
            }
            None => {
                tracing::info!(target: "indexer::processor", %chain, "no indexed state, starting from genesis");
                None
            }
        };
        Ok(HeaderTraversal::new(self.client.clone(), self.config.start_height, seed))
    }

    /// Blocks while the pause flag is set, without holding any database
    /// state.
    async fn wait_if_paused(&self, cancel: &CancellationToken) {
        let mut pause_rx = self.pause_rx.clone();
        if !*pause_rx.borrow() {
            return;
        }

        tracing::info!(target: "indexer::processor", chain = %self.handler.chain(), "processor paused");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                changed = pause_rx.changed() => {
                    if changed.is_err() || !*pause_rx.borrow() {
                        tracing::info!(target: "indexer::processor", chain = %self.handler.chain(), "processor resumed");
                        return;
                    }
                }
            }
        }
    }
}
