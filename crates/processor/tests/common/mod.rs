//! Shared helpers for the processor scenario tests.
#![allow(dead_code)]

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use bridge_indexer_primitives::BlockHeaderInfo;
use bridge_indexer_processor::ProcessorConfig;
use std::time::Duration;

/// Returns `n` ETH in wei.
pub fn eth(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64.pow(18))
}

/// Encodes the portal's opaque deposit blob:
/// `mint (32) || value (32) || gasLimit (8) || isCreation (1) || data`.
pub fn opaque_data(mint: U256, value: U256, gas_limit: u64, data: &[u8]) -> Bytes {
    let mut blob = Vec::with_capacity(73 + data.len());
    blob.extend_from_slice(mint.to_be_bytes::<32>().as_slice());
    blob.extend_from_slice(value.to_be_bytes::<32>().as_slice());
    blob.extend_from_slice(&gas_limit.to_be_bytes());
    blob.push(0);
    blob.extend_from_slice(data);
    blob.into()
}

/// Builds the RPC log of a contract event emitted at the provided position.
pub fn event_log<E: SolEvent>(
    address: Address,
    header: &BlockHeaderInfo,
    log_index: u64,
    transaction_hash: B256,
    event: &E,
) -> Log {
    Log {
        inner: alloy_primitives::Log { address, data: event.encode_log_data() },
        block_hash: Some(header.hash),
        block_number: Some(header.number),
        block_timestamp: Some(header.timestamp),
        transaction_hash: Some(transaction_hash),
        transaction_index: Some(0),
        log_index: Some(log_index),
        removed: false,
    }
}

/// A processor configuration suited to the mocked chains of the tests.
pub fn processor_config(start_height: u64) -> ProcessorConfig {
    ProcessorConfig {
        start_height,
        max_header_batch: 500,
        poll_interval: Duration::from_millis(10),
    }
}
