use crate::ClientError;

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Log};
use bridge_indexer_primitives::BlockHeaderInfo;

/// A narrow view onto one chain: headers by position and logs by filter.
///
/// All methods are cancel-safe; dropping the future aborts the in-flight
/// request.
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// Returns the latest header of the chain.
    async fn latest_header(&self) -> Result<BlockHeaderInfo, ClientError>;

    /// Returns the header with the provided hash, if known to the node.
    async fn block_header_by_hash(&self, hash: B256)
        -> Result<Option<BlockHeaderInfo>, ClientError>;

    /// Returns the header at the provided height, if present.
    async fn block_header_by_number(
        &self,
        number: u64,
    ) -> Result<Option<BlockHeaderInfo>, ClientError>;

    /// Returns the contiguous headers in `[from, to]`. A hole in the range is
    /// a [`ClientError::MissingBlock`].
    async fn headers_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<BlockHeaderInfo>, ClientError>;

    /// Returns the logs emitted by `addresses` in the block range `[from, to]`.
    async fn filter_logs(
        &self,
        from: u64,
        to: u64,
        addresses: &[Address],
    ) -> Result<Vec<Log>, ClientError>;
}

#[async_trait::async_trait]
impl<C: ChainClient + ?Sized> ChainClient for std::sync::Arc<C> {
    async fn latest_header(&self) -> Result<BlockHeaderInfo, ClientError> {
        (**self).latest_header().await
    }

    async fn block_header_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        (**self).block_header_by_hash(hash).await
    }

    async fn block_header_by_number(
        &self,
        number: u64,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        (**self).block_header_by_number(number).await
    }

    async fn headers_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<BlockHeaderInfo>, ClientError> {
        (**self).headers_in_range(from, to).await
    }

    async fn filter_logs(
        &self,
        from: u64,
        to: u64,
        addresses: &[Address],
    ) -> Result<Vec<Log>, ClientError> {
        (**self).filter_logs(from, to, addresses).await
    }
}

/// A [`ChainClient`] backed by an alloy [`Provider`].
///
/// The provider should implement some backoff strategy using
/// [`alloy_transport::layers::RetryBackoffLayer`] in the client/transport in
/// order to avoid excessive queries on the RPC provider.
#[derive(Debug, Clone)]
pub struct RpcChainClient<P> {
    /// The execution node provider.
    provider: P,
}

impl<P> RpcChainClient<P> {
    /// Returns a new [`RpcChainClient`] over the provided provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P: Provider> ChainClient for RpcChainClient<P> {
    async fn latest_header(&self) -> Result<BlockHeaderInfo, ClientError> {
        let block = self
            .provider
            .get_block(BlockNumberOrTag::Latest.into())
            .await?
            .expect("latest block should always exist");
        Ok(header_info(&block.header))
    }

    async fn block_header_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        Ok(self.provider.get_block(hash.into()).await?.map(|b| header_info(&b.header)))
    }

    async fn block_header_by_number(
        &self,
        number: u64,
    ) -> Result<Option<BlockHeaderInfo>, ClientError> {
        Ok(self
            .provider
            .get_block(BlockNumberOrTag::Number(number).into())
            .await?
            .map(|b| header_info(&b.header)))
    }

    async fn headers_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<BlockHeaderInfo>, ClientError> {
        let mut headers = Vec::with_capacity((to - from + 1) as usize);
        for number in from..=to {
            tracing::trace!(target: "indexer::client", number, "fetching block");
            let header =
                self.block_header_by_number(number).await?.ok_or(ClientError::MissingBlock(number))?;
            headers.push(header);
        }
        Ok(headers)
    }

    async fn filter_logs(
        &self,
        from: u64,
        to: u64,
        addresses: &[Address],
    ) -> Result<Vec<Log>, ClientError> {
        let filter = Filter::new().address(addresses.to_vec()).from_block(from).to_block(to);
        tracing::trace!(target: "indexer::client", ?filter, "fetching logs");
        Ok(self.provider.get_logs(&filter).await?)
    }
}

fn header_info(header: &alloy_rpc_types_eth::Header) -> BlockHeaderInfo {
    BlockHeaderInfo {
        hash: header.hash,
        parent_hash: header.parent_hash,
        number: header.number,
        timestamp: header.timestamp,
    }
}
