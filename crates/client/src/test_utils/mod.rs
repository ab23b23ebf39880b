//! Test utilities for the chain client and traversal.

use crate::{random, ChainClient, ClientError, PortalReader, ProvenWithdrawalView};

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::Log;
use arbitrary::Arbitrary;
use bridge_indexer_primitives::BlockHeaderInfo;
use std::{collections::HashMap, sync::Mutex};

/// Test utils for arbitrary.
pub mod arbitrary_utils;

/// Returns a chain of random linked headers of size `len`, as
/// `(first, last, chain)`.
pub fn chain(len: usize) -> (BlockHeaderInfo, BlockHeaderInfo, Vec<BlockHeaderInfo>) {
    assert!(len >= 2, "chain should have a minimal length of two");

    let mut chain = Vec::with_capacity(len);
    chain.push(random!(BlockHeaderInfo));
    for i in 1..len {
        let mut next = random!(BlockHeaderInfo);
        next.number = chain[i - 1].number + 1;
        next.parent_hash = chain[i - 1].hash;
        chain.push(next);
    }

    (*chain.first().unwrap(), *chain.last().unwrap(), chain)
}

/// Returns a chain of random linked headers of size `len`, starting at the
/// provided header.
pub fn chain_from(header: &BlockHeaderInfo, len: usize) -> Vec<BlockHeaderInfo> {
    assert!(len >= 2, "fork should have a minimal length of two");

    let mut chain = Vec::with_capacity(len);
    chain.push(*header);
    for i in 0..len - 1 {
        let mut next = random!(BlockHeaderInfo);
        next.parent_hash = chain[i].hash;
        next.number = chain[i].number + 1;
        next.timestamp = chain[i].timestamp + 2;
        chain.push(next);
    }
    chain
}

/// A mock implementation of the [`ChainClient`] trait serving a fixed set of
/// headers and logs.
#[derive(Debug, Default)]
pub struct MockChain {
    headers: Mutex<Vec<BlockHeaderInfo>>,
    logs: Mutex<Vec<Log>>,
}

impl MockChain {
    /// Returns a new [`MockChain`] serving the provided headers.
    pub fn with_headers(headers: Vec<BlockHeaderInfo>) -> Self {
        Self { headers: Mutex::new(headers), logs: Mutex::new(vec![]) }
    }

    /// Returns a new [`MockChain`] serving the provided headers and logs.
    pub fn with_headers_and_logs(headers: Vec<BlockHeaderInfo>, logs: Vec<Log>) -> Self {
        Self { headers: Mutex::new(headers), logs: Mutex::new(logs) }
    }

    /// Extends the served chain, simulating chain progression.
    pub fn extend(&self, headers: impl IntoIterator<Item = BlockHeaderInfo>) {
        self.headers.lock().unwrap().extend(headers);
    }

    /// Adds logs to the served set.
    pub fn add_logs(&self, logs: impl IntoIterator<Item = Log>) {
        self.logs.lock().unwrap().extend(logs);
    }
}

#[async_trait::async_trait]
impl ChainClient for MockChain {
    async fn latest_header(&self) -> Result<BlockHeaderInfo, ClientError> {
        let headers = self.headers.lock().unwrap();
        headers.iter().max_by_key(|h| h.number).copied().ok_or(ClientError::MissingBlock(0))
    }

    async fn block_header_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        Ok(self.headers.lock().unwrap().iter().find(|h| h.hash == hash).copied())
    }

    async fn block_header_by_number(
        &self,
        number: u64,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        Ok(self.headers.lock().unwrap().iter().rev().find(|h| h.number == number).copied())
    }

    async fn headers_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<BlockHeaderInfo>, ClientError> {
        let mut headers = Vec::with_capacity((to - from + 1) as usize);
        for number in from..=to {
            headers.push(
                self.block_header_by_number(number)
                    .await?
                    .ok_or(ClientError::MissingBlock(number))?,
            );
        }
        Ok(headers)
    }

    async fn filter_logs(
        &self,
        from: u64,
        to: u64,
        addresses: &[Address],
    ) -> Result<Vec<Log>, ClientError> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|log| {
                log.block_number.is_some_and(|n| (from..=to).contains(&n)) &&
                    addresses.contains(&log.inner.address)
            })
            .cloned()
            .collect())
    }
}

/// A mock implementation of the [`PortalReader`] trait.
#[derive(Debug, Default)]
pub struct MockPortal {
    proven: HashMap<B256, ProvenWithdrawalView>,
}

impl MockPortal {
    /// Records a proven withdrawal the portal will report.
    pub fn insert_proven(&mut self, withdrawal_hash: B256, view: ProvenWithdrawalView) {
        self.proven.insert(withdrawal_hash, view);
    }
}

#[async_trait::async_trait]
impl PortalReader for MockPortal {
    async fn proven_withdrawal(
        &self,
        withdrawal_hash: B256,
    ) -> Result<ProvenWithdrawalView, ClientError> {
        Ok(self.proven.get(&withdrawal_hash).copied().unwrap_or_default())
    }
}
