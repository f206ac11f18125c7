//! Digest engine error types

use thiserror::Error;

/// Largest total input length, in bytes, whose bit count fits the 64-bit
/// length field appended during padding.
pub const MAX_INPUT_LEN: u64 = u64::MAX / 8;

/// Errors raised by the digest engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// Appending would push the message past the encodable length
    #[error(
        "Input length overflow: {processed} bytes already absorbed, appending {attempted} more would exceed the limit of {limit} bytes"
    )]
    LengthOverflow {
        processed: u64,
        attempted: u64,
        limit: u64,
    },
}

impl DigestError {
    /// Create a length overflow error against the SHA-1 length limit
    pub fn length_overflow(processed: u64, attempted: u64) -> Self {
        Self::LengthOverflow {
            processed,
            attempted,
            limit: MAX_INPUT_LEN,
        }
    }
}
