//! Chain client abstraction and the resumable header traversal cursor.

mod client;
pub use client::{ChainClient, RpcChainClient};

mod error;
pub use error::{ClientError, TraversalError};

mod portal;
pub use portal::{PortalClient, PortalReader, ProvenWithdrawalView};

mod traversal;
pub use traversal::HeaderTraversal;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers.
pub mod test_utils;
