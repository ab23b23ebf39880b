use alloy_json_rpc::RpcError;
use alloy_primitives::B256;
use alloy_transport::TransportErrorKind;

/// An error that occurred while querying a chain.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The RPC transport failed. Callers retry these with bounded backoff.
    #[error("rpc transport error: {0}")]
    Transport(#[from] RpcError<TransportErrorKind>),
    /// A block expected to exist was not returned by the node.
    #[error("missing block {0}")]
    MissingBlock(u64),
    /// The return data of a contract view call did not decode.
    #[error("failed to decode call return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

impl ClientError {
    /// Whether the error is worth retrying from the caller's side.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// An error that occurred while traversing the canonical header stream.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    /// The underlying chain query failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The fetched headers do not extend the cursor's chain. Fatal: the
    /// indexed chain is no longer canonical and must be re-seeded.
    #[error("reorg detected at block {number}: expected parent {expected}, got {got}")]
    ReorgDetected {
        /// The number of the first header breaking linkage.
        number: u64,
        /// The hash the header's parent was expected to be.
        expected: B256,
        /// The parent hash the header actually carries.
        got: B256,
    },
}

impl TraversalError {
    /// Whether the error is worth retrying from the caller's side.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_transient())
    }
}
