//! Concurrent batch hashing of many files
//!
//! Every file gets its own engine on its own task; the number of files in
//! flight is bounded by `max_concurrent_files`. Results are reported in input
//! order.

use crate::file_io::{FileHashResult, FileHasher};
use crate::{EngineConfig, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Outcome for one input path
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: Result<FileHashResult>,
}

/// Result of batch processing
#[derive(Debug)]
pub struct BatchProcessingResult {
    /// Total files submitted
    pub total_files: usize,
    /// Successfully hashed files
    pub successful: usize,
    /// Failed files
    pub failed: usize,
    /// Files never started because an earlier failure halted the batch
    pub skipped: usize,
    /// Total processing time
    pub total_time: Duration,
    /// Per-file outcomes, in input order, skipped files omitted
    pub entries: Vec<BatchEntry>,
}

impl BatchProcessingResult {
    /// Bytes hashed across all successful files
    pub fn total_bytes(&self) -> u64 {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_ref().ok())
            .map(|result| result.file_size)
            .sum()
    }

    /// Whether every submitted file was hashed
    pub fn is_complete_success(&self) -> bool {
        self.successful == self.total_files
    }
}

/// Hashes batches of files concurrently
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    hasher: FileHasher,
    max_concurrent_files: usize,
    continue_on_error: bool,
}

impl BatchProcessor {
    /// Create a batch processor, rejecting invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let max_concurrent_files = config.max_concurrent_files;
        Ok(Self {
            hasher: FileHasher::new(config)?,
            max_concurrent_files,
            continue_on_error: true,
        })
    }

    /// Keep going after a failed file (the default) or stop starting new ones
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Hash every path. Must be called from within a tokio runtime.
    pub async fn process_files(&self, paths: Vec<PathBuf>) -> BatchProcessingResult {
        let start_time = Instant::now();
        let total_files = paths.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_files));
        let halted = Arc::new(AtomicBool::new(false));
        let mut pending = FuturesUnordered::new();

        debug!(
            "Processing batch of {total_files} files, {} at a time",
            self.max_concurrent_files
        );

        // Permits are taken in input order, so files start in input order
        for (index, path) in paths.into_iter().enumerate() {
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            if halted.load(Ordering::Acquire) {
                break;
            }

            let halted = Arc::clone(&halted);
            let hasher = self.hasher.clone();
            let continue_on_error = self.continue_on_error;

            let handle = tokio::spawn(async move {
                let outcome = hasher.hash_file(&path).await;
                if outcome.is_err() && !continue_on_error {
                    halted.store(true, Ordering::Release);
                }
                drop(permit);
                BatchEntry { path, outcome }
            });
            pending.push(async move { (index, handle.await) });
        }

        let mut entries = Vec::with_capacity(total_files);
        while let Some((index, joined)) = pending.next().await {
            match joined {
                Ok(entry) => entries.push((index, entry)),
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => warn!("Hash task for batch input {index} did not finish: {err}"),
            }
        }
        entries.sort_by_key(|(index, _)| *index);

        let entries: Vec<BatchEntry> = entries.into_iter().map(|(_, entry)| entry).collect();
        let successful = entries.iter().filter(|e| e.outcome.is_ok()).count();
        let failed = entries.len() - successful;

        let result = BatchProcessingResult {
            total_files,
            successful,
            failed,
            skipped: total_files - entries.len(),
            total_time: start_time.elapsed(),
            entries,
        };

        debug!(
            "Batch finished: {} ok, {} failed, {} skipped in {:?}",
            result.successful, result.failed, result.skipped, result.total_time
        );
        result
    }
}
