//! Streaming SHA-1 over readers and files
//!
//! Input is read in `chunk_size` pieces and fed to a single engine, so memory
//! use stays at one chunk buffer regardless of input size.

use crate::hashing::{Digest, Sha1};
use crate::{EngineConfig, Error, Result, error::IoError};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Result of hashing a file or stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileHashResult {
    /// Source path, `None` for anonymous streams
    pub path: Option<PathBuf>,
    pub digest: Digest,
    pub file_size: u64,
    pub processing_time: Duration,
}

/// Streams files and readers through the SHA-1 engine
#[derive(Debug, Clone)]
pub struct FileHasher {
    config: EngineConfig,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl FileHasher {
    /// Create a file hasher, rejecting invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hash everything a blocking reader yields
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> Result<FileHashResult> {
        let start_time = Instant::now();
        let mut engine = Sha1::new();
        let mut buffer = vec![0u8; self.config.chunk_size];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(IoError::from_std(err).into()),
            };
            engine.update(&buffer[..n])?;
        }

        let file_size = engine.total_len();
        trace!("Hashed {file_size} bytes from reader");

        Ok(FileHashResult {
            path: None,
            digest: engine.finalize(),
            file_size,
            processing_time: start_time.elapsed(),
        })
    }

    /// Hash everything an async reader yields
    pub async fn hash_async_reader<R: AsyncRead + Unpin>(
        &self,
        mut reader: R,
    ) -> Result<FileHashResult> {
        let start_time = Instant::now();
        let mut engine = Sha1::new();
        let mut buffer = vec![0u8; self.config.chunk_size];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            engine.update(&buffer[..n])?;
        }

        let file_size = engine.total_len();

        Ok(FileHashResult {
            path: None,
            digest: engine.finalize(),
            file_size,
            processing_time: start_time.elapsed(),
        })
    }

    /// Hash the contents of the file at `path`
    pub async fn hash_file(&self, path: &Path) -> Result<FileHashResult> {
        debug!("Hashing file {}", path.display());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| open_error(path, err))?;
        if metadata.is_dir() {
            return Err(IoError::is_directory(path).into());
        }

        let file = File::open(path).await.map_err(|err| open_error(path, err))?;
        let mut result = self
            .hash_async_reader(file)
            .await
            .map_err(|err| attach_path(err, path))?;
        result.path = Some(path.to_path_buf());

        debug!(
            "{} {} ({} bytes in {:?})",
            result.digest,
            path.display(),
            result.file_size,
            result.processing_time
        );
        Ok(result)
    }
}

fn open_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => IoError::file_not_found(path).into(),
        io::ErrorKind::PermissionDenied => IoError::permission_denied(path, err).into(),
        _ => IoError::from_std(err).with_path(path).into(),
    }
}

fn attach_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Io(io_err) if io_err.path.is_none() => Error::Io(io_err.with_path(path)),
        other => other,
    }
}
