//! Tests for the processor control surface: pause/resume, supervision and
//! shutdown.

mod common;
use common::{event_log, processor_config};

use alloy_primitives::B256;
use bridge_indexer_client::test_utils::{chain, chain_from, MockChain, MockPortal};
use bridge_indexer_contracts::portal::WithdrawalFinalized;
use bridge_indexer_db::{test_utils::setup_test_db, Database, DatabaseOperations};
use bridge_indexer_primitives::{L1Contracts, L2Contracts};
use bridge_indexer_processor::{L1Handler, L2Handler, Processor, ProcessorError, Supervisor};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// Polls the database until the latest L2 header reaches the expected
/// height.
async fn wait_for_l2_height(db: &Database, number: u64) {
    for _ in 0..200 {
        if db.latest_l2_block_header().await.unwrap().map(|h| h.number) == Some(number) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("L2 processor did not reach height {number} in time");
}

#[tokio::test]
async fn test_pause_and_resume_between_batches() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let predeploys = L2Contracts::predeploys();

    let (first, tip, l2_chain) = chain(3);
    let l2 = Arc::new(MockChain::with_headers(l2_chain));
    let processor = Processor::new(
        l2.clone(),
        L2Handler::new(predeploys),
        db.clone(),
        processor_config(first.number),
    );
    let pause = processor.pause_handle();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(processor.run(cancel.clone()));

    wait_for_l2_height(&db, tip.number).await;

    // Pause, then extend the chain: the paused processor must not index the
    // extension.
    pause.pause();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let extension = chain_from(&tip, 3);
    l2.extend(extension[1..].to_vec());
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(db.latest_l2_block_header().await?.unwrap().number, tip.number);

    // Resume: the extension is picked up.
    pause.resume();
    wait_for_l2_height(&db, extension.last().unwrap().number).await;

    cancel.cancel();
    task.await??;

    Ok(())
}

#[tokio::test]
async fn test_supervisor_tears_down_on_fatal_error() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let contracts = L1Contracts::dev();
    let predeploys = L2Contracts::predeploys();

    // The L1 batch carries a finalization for a withdrawal that was never
    // indexed, which is fatal.
    let (l1_first, _, l1_chain) = chain(3);
    let l1 = MockChain::with_headers_and_logs(
        l1_chain.clone(),
        vec![event_log(
            contracts.portal,
            &l1_chain[1],
            0,
            B256::random(),
            &WithdrawalFinalized { withdrawalHash: B256::random(), success: true },
        )],
    );
    let l1_processor = Processor::new(
        l1,
        L1Handler::new(contracts, MockPortal::default()),
        db.clone(),
        processor_config(l1_first.number),
    );

    // The L2 side is healthy and would run forever.
    let (l2_first, _, l2_chain) = chain(3);
    let l2_processor = Processor::new(
        MockChain::with_headers(l2_chain),
        L2Handler::new(predeploys),
        db.clone(),
        processor_config(l2_first.number),
    );

    // The supervisor propagates the fatal error and cancels the peer.
    let err = tokio::time::timeout(
        Duration::from_secs(30),
        Supervisor::new(l1_processor, l2_processor).run(CancellationToken::new()),
    )
    .await?
    .unwrap_err();
    assert!(matches!(err, ProcessorError::MissingPredecessor { .. }));

    Ok(())
}

#[tokio::test]
async fn test_supervisor_shuts_down_cleanly_on_cancellation() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);

    let (l1_first, _, l1_chain) = chain(3);
    let l1_processor = Processor::new(
        MockChain::with_headers(l1_chain),
        L1Handler::new(L1Contracts::dev(), MockPortal::default()),
        db.clone(),
        processor_config(l1_first.number),
    );
    let (l2_first, l2_tip, l2_chain) = chain(3);
    let l2_processor = Processor::new(
        MockChain::with_headers(l2_chain),
        L2Handler::new(L2Contracts::predeploys()),
        db.clone(),
        processor_config(l2_first.number),
    );

    let cancel = CancellationToken::new();
    let task = tokio::spawn(Supervisor::new(l1_processor, l2_processor).run(cancel.clone()));

    // Both processors sync and idle; cancellation shuts them down cleanly.
    wait_for_l2_height(&db, l2_tip.number).await;
    cancel.cancel();
    task.await??;

    Ok(())
}
