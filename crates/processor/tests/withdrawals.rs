//! Scenario tests for the withdrawal (L2 → L1) lifecycle.

mod common;
use common::{eth, event_log, processor_config};

use alloy_primitives::{Address, B256, U256};
use bridge_indexer_client::test_utils::{chain, chain_from, MockChain, MockPortal};
use bridge_indexer_client::ProvenWithdrawalView;
use bridge_indexer_contracts::{
    message_passer::MessagePassed,
    portal::{WithdrawalFinalized, WithdrawalProven},
    standard_bridge::WithdrawalInitiated,
};
use bridge_indexer_db::{test_utils::setup_test_db, DatabaseOperations};
use bridge_indexer_primitives::{L1Contracts, L2Contracts};
use bridge_indexer_processor::{L1Handler, L2Handler, Processor, ProcessorError};
use std::sync::Arc;

fn alice() -> Address {
    Address::repeat_byte(0xaa)
}

fn message_passed(withdrawal_hash: B256) -> MessagePassed {
    MessagePassed {
        nonce: U256::from(42),
        sender: alice(),
        target: alice(),
        value: eth(1),
        gasLimit: U256::from(200_000),
        data: vec![0x01].into(),
        withdrawalHash: withdrawal_hash,
    }
}

fn withdrawal_initiated(nonce: U256) -> WithdrawalInitiated {
    WithdrawalInitiated {
        messageNonce: nonce,
        from: alice(),
        to: alice(),
        l1Token: Address::ZERO,
        l2Token: Address::ZERO,
        amount: eth(1),
        extraData: vec![0x01].into(),
    }
}

#[tokio::test]
async fn test_withdrawal_three_step() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let withdrawal_hash = B256::random();
    let message_nonce = U256::from(7);

    // Alice withdraws 1 ETH on the L2: the bridge event is immediately
    // followed by the message passer's event carrying the withdrawal hash.
    let predeploys = L2Contracts::predeploys();
    let (l2_first, _, l2_chain) = chain(4);
    let withdraw_block = l2_chain[1];
    let withdraw_tx = B256::random();
    let l2 = MockChain::with_headers_and_logs(
        l2_chain,
        vec![
            event_log(
                predeploys.standard_bridge,
                &withdraw_block,
                0,
                withdraw_tx,
                &withdrawal_initiated(message_nonce),
            ),
            event_log(
                predeploys.to_l1_message_passer,
                &withdraw_block,
                1,
                withdraw_tx,
                &message_passed(withdrawal_hash),
            ),
        ],
    );
    let mut l2_processor = Processor::new(
        l2,
        L2Handler::new(predeploys),
        db.clone(),
        processor_config(l2_first.number),
    );
    assert!(l2_processor.step().await?);

    // After the L2 tick the withdrawal is indexed, neither proven nor
    // finalized.
    let withdrawal = db.transaction_withdrawal_by_hash(withdrawal_hash).await?.unwrap();
    assert_eq!(withdrawal.nonce, U256::from(42));
    assert_eq!(withdrawal.tx.amount, eth(1));
    assert_eq!(withdrawal.proven_l1_event_guid, None);
    assert_eq!(withdrawal.finalized_l1_event_guid, None);

    // The withdrawal is proven on the L1.
    let contracts = L1Contracts::dev();
    let (l1_first, l1_tip, l1_chain) = chain(4);
    let prove_block = l1_chain[2];
    let l1 = Arc::new(MockChain::with_headers_and_logs(
        l1_chain.clone(),
        vec![event_log(
            contracts.portal,
            &prove_block,
            0,
            B256::random(),
            &WithdrawalProven { withdrawalHash: withdrawal_hash, from: alice(), to: alice() },
        )],
    ));
    let mut l1_processor = Processor::new(
        l1.clone(),
        L1Handler::new(contracts, MockPortal::default()),
        db.clone(),
        processor_config(l1_first.number),
    );
    assert!(l1_processor.step().await?);

    let withdrawal = db.transaction_withdrawal_by_hash(withdrawal_hash).await?.unwrap();
    assert!(withdrawal.proven_l1_event_guid.is_some());
    assert_eq!(withdrawal.finalized_l1_event_guid, None);

    // The challenge window passes and the withdrawal is finalized in a later
    // L1 batch.
    let extension = chain_from(&l1_tip, 3);
    let finalize_block = extension[1];
    l1.extend(extension[1..].to_vec());
    l1.add_logs(vec![event_log(
        contracts.portal,
        &finalize_block,
        0,
        B256::random(),
        &WithdrawalFinalized { withdrawalHash: withdrawal_hash, success: true },
    )]);
    assert!(l1_processor.step().await?);

    let withdrawal = db.transaction_withdrawal_by_hash(withdrawal_hash).await?.unwrap();
    assert!(withdrawal.finalized_l1_event_guid.is_some());

    Ok(())
}

#[tokio::test]
async fn test_withdrawal_proven_before_l2_catches_up() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let withdrawal_hash = B256::random();

    // The portal reports the withdrawal proven against an output index past
    // anything the L2 processor has indexed.
    let contracts = L1Contracts::dev();
    let mut portal = MockPortal::default();
    portal.insert_proven(
        withdrawal_hash,
        ProvenWithdrawalView {
            output_root: B256::random(),
            timestamp: 1,
            l2_output_index: U256::from(10),
        },
    );

    let (l1_first, _, l1_chain) = chain(4);
    let l1 = MockChain::with_headers_and_logs(
        l1_chain.clone(),
        vec![event_log(
            contracts.portal,
            &l1_chain[1],
            0,
            B256::random(),
            &WithdrawalProven { withdrawalHash: withdrawal_hash, from: alice(), to: alice() },
        )],
    );
    let mut l1_processor = Processor::new(
        l1,
        L1Handler::new(contracts, portal),
        db.clone(),
        processor_config(l1_first.number),
    );

    // The L1 processor backs off without writing anything.
    let err = l1_processor.step().await.unwrap_err();
    assert!(matches!(err, ProcessorError::WaitingForPeer { .. }));
    assert!(err.is_retryable());
    assert!(db.transaction_withdrawal_by_hash(withdrawal_hash).await?.is_none());
    assert!(db.latest_l1_block_header().await?.is_none());

    // The L2 processor catches up and indexes the initiation.
    let predeploys = L2Contracts::predeploys();
    let (l2_first, _, l2_chain) = chain(3);
    let withdraw_tx = B256::random();
    let l2 = MockChain::with_headers_and_logs(
        l2_chain.clone(),
        vec![
            event_log(
                predeploys.standard_bridge,
                &l2_chain[1],
                0,
                withdraw_tx,
                &withdrawal_initiated(U256::from(7)),
            ),
            event_log(
                predeploys.to_l1_message_passer,
                &l2_chain[1],
                1,
                withdraw_tx,
                &message_passed(withdrawal_hash),
            ),
        ],
    );
    let mut l2_processor = Processor::new(
        l2,
        L2Handler::new(predeploys),
        db.clone(),
        processor_config(l2_first.number),
    );
    assert!(l2_processor.step().await?);

    // The L1 processor's retry of the same batch now succeeds.
    assert!(l1_processor.step().await?);
    let withdrawal = db.transaction_withdrawal_by_hash(withdrawal_hash).await?.unwrap();
    assert!(withdrawal.proven_l1_event_guid.is_some());

    Ok(())
}

#[tokio::test]
async fn test_withdrawal_finalized_without_initiation_is_fatal() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let contracts = L1Contracts::dev();

    // A finalization with no indexed withdrawal can never be an L2 lag:
    // proving precedes finalization on the L1.
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
    let mut l1_processor = Processor::new(
        l1,
        L1Handler::new(contracts, MockPortal::default()),
        db.clone(),
        processor_config(l1_first.number),
    );

    let err = l1_processor.step().await.unwrap_err();
    assert!(matches!(err, ProcessorError::MissingPredecessor { .. }));
    assert!(!err.is_retryable());

    Ok(())
}

#[tokio::test]
async fn test_withdrawal_finalized_before_proven_is_fatal() -> eyre::Result<()> {
    let db = Arc::new(setup_test_db().await);
    let withdrawal_hash = B256::random();

    // Index the withdrawal initiation on the L2.
    let predeploys = L2Contracts::predeploys();
    let (l2_first, _, l2_chain) = chain(3);
    let withdraw_tx = B256::random();
    let l2 = MockChain::with_headers_and_logs(
        l2_chain.clone(),
        vec![
            event_log(
                predeploys.standard_bridge,
                &l2_chain[1],
                0,
                withdraw_tx,
                &withdrawal_initiated(U256::from(7)),
            ),
            event_log(
                predeploys.to_l1_message_passer,
                &l2_chain[1],
                1,
                withdraw_tx,
                &message_passed(withdrawal_hash),
            ),
        ],
    );
    let mut l2_processor = Processor::new(
        l2,
        L2Handler::new(predeploys),
        db.clone(),
        processor_config(l2_first.number),
    );
    assert!(l2_processor.step().await?);

    // A finalization without a prior prove violates the lifecycle invariant.
    let contracts = L1Contracts::dev();
    let (l1_first, _, l1_chain) = chain(3);
    let l1 = MockChain::with_headers_and_logs(
        l1_chain.clone(),
        vec![event_log(
            contracts.portal,
            &l1_chain[1],
            0,
            B256::random(),
            &WithdrawalFinalized { withdrawalHash: withdrawal_hash, success: true },
        )],
    );
    let mut l1_processor = Processor::new(
        l1,
        L1Handler::new(contracts, MockPortal::default()),
        db.clone(),
        processor_config(l1_first.number),
    );

    let err = l1_processor.step().await.unwrap_err();
    assert!(matches!(err, ProcessorError::Database(_)));
    assert!(!err.is_retryable());

    Ok(())
}
