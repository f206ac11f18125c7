//! SHA-1 hashing for the core library
//!
//! The engine lives in [`engine`]; this module adds timed results and
//! parallel hashing of independent buffers on top of it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

mod compress;
mod engine;
mod output;

pub use compress::BLOCK_LEN;
pub use engine::{Sha1, digest};
pub use output::{DIGEST_LEN, Digest};

/// Result of hash calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResult {
    pub digest: Digest,
    pub input_size: u64,
    pub duration: Duration,
}

/// Hash calculator for in-memory data
#[derive(Debug, Clone)]
pub struct HashCalculator {
    /// Worker threads used by [`HashCalculator::calculate_many`]
    workers: usize,
}

impl Default for HashCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl HashCalculator {
    /// Create a calculator sized to the available parallelism
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }

    /// Create a calculator with a fixed number of workers (at least one)
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Calculate hash for byte data
    pub fn calculate_bytes(&self, data: &[u8]) -> crate::Result<HashResult> {
        let start_time = Instant::now();

        let mut engine = Sha1::new();
        engine.update(data)?;
        let digest = engine.finalize();

        Ok(HashResult {
            digest,
            input_size: data.len() as u64,
            duration: start_time.elapsed(),
        })
    }

    /// Hash many independent buffers across worker threads.
    ///
    /// Each buffer gets its own engine; results come back in input order.
    pub fn calculate_many(&self, inputs: &[&[u8]]) -> crate::Result<Vec<HashResult>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let per_worker = inputs.len().div_ceil(self.workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .chunks(per_worker)
                .map(|group| {
                    scope.spawn(move || {
                        group
                            .iter()
                            .map(|data| self.calculate_bytes(data))
                            .collect::<crate::Result<Vec<_>>>()
                    })
                })
                .collect();

            let mut results = Vec::with_capacity(inputs.len());
            for handle in handles {
                match handle.join() {
                    Ok(group) => results.extend(group?),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(results)
        })
    }
}
