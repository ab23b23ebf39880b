//! Event schemas and decoding logic for the indexed bridge contracts.

mod error;
pub use error::DecodeError;

pub mod message_passer;
pub mod oracle;
pub mod portal;
pub mod standard_bridge;

pub use portal::DepositTransaction;
pub use standard_bridge::StandardBridgeEvent;
