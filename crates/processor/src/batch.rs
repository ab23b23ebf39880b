use crate::ProcessorError;

use alloy_primitives::B256;
use alloy_rpc_types_eth::Log;
use bridge_indexer_primitives::{BlockHeaderInfo, Chain, ContractEventMeta};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A contract event of the current batch: the ingested metadata next to the
/// raw log it was built from.
#[derive(Debug, Clone)]
pub struct ProcessedEvent {
    /// The ingested event metadata.
    pub meta: ContractEventMeta,
    /// The raw log.
    pub log: Log,
}

impl ProcessedEvent {
    /// Decodes the raw log against the schema its signature announced. A
    /// mismatch is fatal.
    pub fn decode<T: alloy_sol_types::SolEvent>(
        &self,
        name: &'static str,
    ) -> Result<T, ProcessorError> {
        Ok(T::decode_log(&self.log.inner)
            .map_err(|source| bridge_indexer_contracts::DecodeError::Abi { event: name, source })?
            .data)
    }
}

/// The decoded view of one traversal batch: every filtered log paired with a
/// fresh GUID and stamped with its parent block timestamp, indexed by
/// `(block_hash, log_index)` for intra-transaction adjacency lookups.
///
/// Events are held in `(block_number, log_index)` order and must be persisted
/// in that order: the standard bridge emits its high-level event immediately
/// before the portal/message-passer emits the raw one in the next log slot,
/// and the correlation handlers rely on that adjacency.
#[derive(Debug)]
pub struct EventBatch {
    headers: Vec<BlockHeaderInfo>,
    events: Vec<ProcessedEvent>,
    by_position: HashMap<(B256, u64), usize>,
    blocks_with_logs: HashSet<B256>,
}

impl EventBatch {
    /// Builds the batch view from the traversed headers and the filtered
    /// logs. A log referencing a block hash outside the header set is a fatal
    /// [`ProcessorError::LogOutsideBatch`].
    pub fn from_logs(
        chain: Chain,
        headers: Vec<BlockHeaderInfo>,
        logs: Vec<Log>,
    ) -> Result<Self, ProcessorError> {
        let header_map: HashMap<B256, &BlockHeaderInfo> =
            headers.iter().map(|h| (h.hash, h)).collect();

        let mut events = Vec::with_capacity(logs.len());
        let mut blocks_with_logs = HashSet::new();
        for log in logs {
            let block_hash = log.block_hash.ok_or(ProcessorError::MissingLogField("block_hash"))?;
            let log_index = log.log_index.ok_or(ProcessorError::MissingLogField("log_index"))?;
            let transaction_hash = log
                .transaction_hash
                .ok_or(ProcessorError::MissingLogField("transaction_hash"))?;
            let signature =
                log.topic0().copied().ok_or(ProcessorError::MissingLogField("topic0"))?;

            let header = header_map
                .get(&block_hash)
                .ok_or(ProcessorError::LogOutsideBatch { block_hash, log_index })?;

            blocks_with_logs.insert(block_hash);
            events.push(ProcessedEvent {
                meta: ContractEventMeta {
                    guid: event_guid(chain, block_hash, log_index),
                    block_hash,
                    transaction_hash,
                    log_index,
                    signature,
                    data: log.inner.data.data.clone(),
                    timestamp: header.timestamp,
                },
                log,
            });
        }

        events.sort_by_key(|ev| (ev.log.block_number, ev.meta.log_index));
        let by_position = events
            .iter()
            .enumerate()
            .map(|(i, ev)| ((ev.meta.block_hash, ev.meta.log_index), i))
            .collect();

        Ok(Self { headers, events, by_position, blocks_with_logs })
    }

    /// The traversed headers of the batch, in ascending order.
    pub fn headers(&self) -> &[BlockHeaderInfo] {
        &self.headers
    }

    /// The headers that carry at least one in-scope log, in ascending order.
    pub fn headers_with_logs(&self) -> Vec<BlockHeaderInfo> {
        self.headers.iter().filter(|h| self.blocks_with_logs.contains(&h.hash)).copied().collect()
    }

    /// The ingested events of the batch, in `(block_number, log_index)`
    /// order.
    pub fn events(&self) -> impl Iterator<Item = &ProcessedEvent> {
        self.events.iter()
    }

    /// The ingested event metadata of the batch, in order.
    pub fn event_metas(&self) -> Vec<ContractEventMeta> {
        self.events.iter().map(|ev| ev.meta.clone()).collect()
    }

    /// The events carrying the provided signature, in order.
    pub fn events_with_signature(&self, signature: B256) -> impl Iterator<Item = &ProcessedEvent> {
        self.events.iter().filter(move |ev| ev.meta.signature == signature)
    }

    /// The event at `(block_hash, log_index)`, if part of the batch.
    pub fn event_at(&self, block_hash: B256, log_index: u64) -> Option<&ProcessedEvent> {
        self.by_position.get(&(block_hash, log_index)).map(|i| &self.events[*i])
    }

    /// The event in the log slot immediately after the provided one within
    /// the same block.
    pub fn adjacent_event(&self, event: &ProcessedEvent) -> Option<&ProcessedEvent> {
        self.event_at(event.meta.block_hash, event.meta.log_index + 1)
    }
}

/// Derives the GUID of an event from its position. Re-processing a batch
/// after a crash re-derives the same GUIDs, keeping the lifecycle updates
/// idempotent.
fn event_guid(chain: Chain, block_hash: B256, log_index: u64) -> Uuid {
    let mut name = Vec::with_capacity(41);
    name.push(match chain {
        Chain::L1 => 1,
        Chain::L2 => 2,
    });
    name.extend_from_slice(block_hash.as_slice());
    name.extend_from_slice(&log_index.to_be_bytes());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, &name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, LogData};
    use bridge_indexer_client::test_utils::chain;

    fn log(header: &BlockHeaderInfo, log_index: u64) -> Log {
        Log {
            inner: alloy_primitives::Log {
                address: Address::random(),
                data: LogData::new_unchecked(vec![B256::random()], Bytes::new()),
            },
            block_hash: Some(header.hash),
            block_number: Some(header.number),
            block_timestamp: Some(header.timestamp),
            transaction_hash: Some(B256::random()),
            transaction_index: Some(0),
            log_index: Some(log_index),
            removed: false,
        }
    }

    #[test]
    fn test_should_index_events_by_position() {
        let (_, _, headers) = chain(4);
        let logs = vec![log(&headers[2], 1), log(&headers[1], 0), log(&headers[2], 0)];

        let batch = EventBatch::from_logs(Chain::L1, headers.clone(), logs).unwrap();

        // Events are ordered by (block number, log index).
        let ordered: Vec<_> =
            batch.events().map(|ev| (ev.log.block_number.unwrap(), ev.meta.log_index)).collect();
        assert_eq!(
            ordered,
            vec![(headers[1].number, 0), (headers[2].number, 0), (headers[2].number, 1)]
        );

        // Adjacency is an O(1) lookup within the block.
        let first_of_block = batch.event_at(headers[2].hash, 0).unwrap().clone();
        let adjacent = batch.adjacent_event(&first_of_block).unwrap();
        assert_eq!(adjacent.meta.log_index, 1);
        assert!(batch.adjacent_event(adjacent).is_none());

        // Only blocks carrying logs are headers of interest.
        assert_eq!(batch.headers_with_logs(), vec![headers[1], headers[2]]);
    }

    #[test]
    fn test_should_reject_log_outside_batch() {
        let (_, _, headers) = chain(3);
        let (_, _, other) = chain(3);
        let logs = vec![log(&other[0], 0)];

        let err = EventBatch::from_logs(Chain::L1, headers, logs).unwrap_err();
        assert!(matches!(err, ProcessorError::LogOutsideBatch { .. }));
    }

    #[test]
    fn test_should_stamp_parent_block_timestamp() {
        let (_, _, headers) = chain(3);
        let batch =
            EventBatch::from_logs(Chain::L2, headers.clone(), vec![log(&headers[1], 5)]).unwrap();

        let event = batch.events().next().unwrap();
        assert_eq!(event.meta.timestamp, headers[1].timestamp);
    }

    #[test]
    fn test_guid_is_stable_across_reprocessing() {
        let (_, _, headers) = chain(3);
        let the_log = log(&headers[0], 0);

        let batch =
            EventBatch::from_logs(Chain::L1, headers.clone(), vec![the_log.clone()]).unwrap();
        let again = EventBatch::from_logs(Chain::L1, headers.clone(), vec![the_log]).unwrap();

        assert_eq!(
            batch.events().next().unwrap().meta.guid,
            again.events().next().unwrap().meta.guid
        );

        // The same position on the other chain derives a different GUID.
        let l2 = EventBatch::from_logs(
            Chain::L2,
            headers.clone(),
            vec![log(&headers[0], 0)],
        )
        .unwrap();
        assert_ne!(
            batch.events().next().unwrap().meta.guid,
            l2.events().next().unwrap().meta.guid
        );
    }
}
