use crate::{ChainClient, TraversalError};

use bridge_indexer_primitives::BlockHeaderInfo;

/// A resumable cursor over one chain's canonical header stream.
///
/// The cursor emits contiguous, linked batches of headers. It only moves when
/// the caller acknowledges a batch via [`HeaderTraversal::advance`], so a
/// batch whose processing failed is re-emitted on the next call.
#[derive(Debug)]
pub struct HeaderTraversal<C> {
    /// The chain client used to fetch headers.
    client: C,
    /// The height traversal starts at on a cold start.
    start_height: u64,
    /// The last header acknowledged by the caller.
    last_header: Option<BlockHeaderInfo>,
}

impl<C: ChainClient> HeaderTraversal<C> {
    /// Returns a new [`HeaderTraversal`]. `last_header` resumes the cursor
    /// from previously indexed state; `start_height` seeds a cold start.
    pub const fn new(client: C, start_height: u64, last_header: Option<BlockHeaderInfo>) -> Self {
        Self { client, start_height, last_header }
    }

    /// The last acknowledged header.
    pub const fn last_header(&self) -> Option<&BlockHeaderInfo> {
        self.last_header.as_ref()
    }

    /// Returns the next batch of at most `max_batch` canonical headers, or an
    /// empty batch when the chain head has not moved past the cursor.
    pub async fn next_headers(
        &self,
        max_batch: u64,
    ) -> Result<Vec<BlockHeaderInfo>, TraversalError> {
        debug_assert!(max_batch > 0, "batch size must be non-zero");

        let head = self.client.latest_header().await?;
        let start = match &self.last_header {
            Some(last) => last.number + 1,
            None => self.start_height,
        };

        if head.number < start {
            return Ok(vec![]);
        }

        let end = (start + max_batch - 1).min(head.number);
        let headers = self.client.headers_in_range(start, end).await?;

        // The batch must link onto the cursor and be internally contiguous.
        if let (Some(last), Some(first)) = (&self.last_header, headers.first()) {
            if first.parent_hash != last.hash {
                return Err(TraversalError::ReorgDetected {
                    number: first.number,
                    expected: last.hash,
                    got: first.parent_hash,
                });
            }
        }
        for pair in headers.windows(2) {
            if pair[1].parent_hash != pair[0].hash {
                return Err(TraversalError::ReorgDetected {
                    number: pair[1].number,
                    expected: pair[0].hash,
                    got: pair[1].parent_hash,
                });
            }
        }

        Ok(headers)
    }

    /// Acknowledges a batch by moving the cursor to its final header. Called
    /// only after the batch has been durably processed.
    pub fn advance(&mut self, header: BlockHeaderInfo) {
        debug_assert!(
            self.last_header.as_ref().map(|h| h.number < header.number).unwrap_or(true),
            "cursor must advance monotonically"
        );
        self.last_header = Some(header);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chain, chain_from, MockChain};

    #[tokio::test]
    async fn test_should_emit_contiguous_batches() -> eyre::Result<()> {
        // Given
        let (first, _, headers) = chain(10);
        let client = MockChain::with_headers(headers.clone());
        let mut traversal = HeaderTraversal::new(client, first.number, None);

        // When
        let batch = traversal.next_headers(4).await?;

        // Then
        assert_eq!(batch, headers[..4].to_vec());

        // When the batch is acknowledged, the next one follows it.
        traversal.advance(*batch.last().unwrap());
        let batch = traversal.next_headers(4).await?;
        assert_eq!(batch, headers[4..8].to_vec());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_re_emit_unacknowledged_batch() -> eyre::Result<()> {
        // Given
        let (first, _, headers) = chain(6);
        let client = MockChain::with_headers(headers.clone());
        let traversal = HeaderTraversal::new(client, first.number, None);

        // When the batch is not acknowledged, it is emitted again.
        let batch = traversal.next_headers(3).await?;
        let again = traversal.next_headers(3).await?;

        // Then
        assert_eq!(batch, again);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_idle_at_head() -> eyre::Result<()> {
        // Given
        let (first, last, headers) = chain(5);
        let client = MockChain::with_headers(headers);
        let mut traversal = HeaderTraversal::new(client, first.number, None);

        // When the cursor reaches the head, batches are empty.
        let batch = traversal.next_headers(100).await?;
        traversal.advance(*batch.last().unwrap());
        let empty = traversal.next_headers(100).await?;

        // Then
        assert_eq!(batch.last(), Some(&last));
        assert!(empty.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_resume_from_seed_header() -> eyre::Result<()> {
        // Given
        let (first, _, headers) = chain(8);
        let client = MockChain::with_headers(headers.clone());
        let traversal = HeaderTraversal::new(client, first.number, Some(headers[3]));

        // When
        let batch = traversal.next_headers(100).await?;

        // Then
        assert_eq!(batch, headers[4..].to_vec());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_detect_reorg_against_cursor() -> eyre::Result<()> {
        // Given a chain forking away from the cursor's last header.
        let (first, _, headers) = chain(6);
        let fork = chain_from(&headers[2], 5);
        let client = MockChain::with_headers(
            headers[..3].iter().chain(fork[1..].iter()).copied().collect::<Vec<_>>(),
        );
        let traversal = HeaderTraversal::new(client, first.number, Some(headers[3]));

        // When
        let err = traversal.next_headers(100).await.unwrap_err();

        // Then
        assert!(matches!(err, TraversalError::ReorgDetected { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_detect_broken_linkage_within_batch() -> eyre::Result<()> {
        // Given a gap in the middle of the returned range.
        let (first, _, mut headers) = chain(6);
        headers[3].parent_hash = headers[0].hash;
        let client = MockChain::with_headers(headers);
        let traversal = HeaderTraversal::new(client, first.number, None);

        // When
        let err = traversal.next_headers(100).await.unwrap_err();

        // Then
        assert!(matches!(err, TraversalError::ReorgDetected { number, .. } if number == first.number + 3));

        Ok(())
    }
}
