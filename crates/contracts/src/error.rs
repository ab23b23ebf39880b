/// An error occurring while decoding a contract event.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The log payload did not match the expected event schema.
    #[error("failed to decode {event} log: {source}")]
    Abi {
        /// The name of the event schema the log was decoded against.
        event: &'static str,
        /// The underlying ABI error.
        source: alloy_sol_types::Error,
    },
    /// The opaque data blob of a deposit is shorter than its fixed prefix.
    #[error("deposit opaque data too short: {len} bytes")]
    OpaqueDataTooShort {
        /// The length of the blob.
        len: usize,
    },
}
