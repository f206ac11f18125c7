//! Validation related error types

use thiserror::Error;

/// Configuration and input parsing errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Text that does not encode a 20-byte digest
    #[error("Invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },
}

impl ValidationError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }

    /// Create an invalid digest error
    pub fn invalid_digest(input: &str, reason: &str) -> Self {
        Self::InvalidDigest {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
