//! SHA-1 Core Library
//!
//! A native SHA-1 digest engine with one-shot and incremental use, plus
//! streaming file hashing and concurrent batch hashing built on it.

pub mod batch_processor;
pub mod error;
pub mod file_io;
pub mod hashing;

// Re-export main types
pub use batch_processor::{BatchProcessingResult, BatchProcessor};
pub use error::{Error, Result};
pub use file_io::{FileHashResult, FileHasher};
pub use hashing::{BLOCK_LEN, DIGEST_LEN, Digest, HashCalculator, HashResult, Sha1, digest};

use error::ValidationError;

/// Largest accepted `chunk_size`; each reader allocates one buffer of this size
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Largest accepted `max_concurrent_files`
pub const MAX_CONCURRENT_FILES: usize = 1024;

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bytes read per call when streaming a file or reader
    pub chunk_size: usize,
    /// Files hashed at the same time by the batch processor
    pub max_concurrent_files: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024, // 64KB, a multiple of the block size
            max_concurrent_files: 4,
        }
    }
}

impl EngineConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            chunk_size: 1000, // deliberately not block aligned
            max_concurrent_files: 2,
        }
    }

    /// Reject settings the hashers cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ValidationError::invalid_configuration(
                "chunk_size must be greater than zero",
            )
            .into());
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ValidationError::invalid_configuration(&format!(
                "chunk_size must be at most {MAX_CHUNK_SIZE} bytes"
            ))
            .into());
        }
        if self.max_concurrent_files == 0 {
            return Err(ValidationError::invalid_configuration(
                "max_concurrent_files must be greater than zero",
            )
            .into());
        }
        if self.max_concurrent_files > MAX_CONCURRENT_FILES {
            return Err(ValidationError::invalid_configuration(&format!(
                "max_concurrent_files must be at most {MAX_CONCURRENT_FILES}"
            ))
            .into());
        }
        Ok(())
    }
}
