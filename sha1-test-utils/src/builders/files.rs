//! Temporary input files

use super::deterministic_bytes;
use sha1_core::{Error, Result, error::IoError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates input files inside a private temporary directory that is removed
/// when the builder is dropped
pub struct TestFileBuilder {
    dir: TempDir,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a builder with a fresh temporary directory
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().map_err(|e| Error::Io(IoError::from_std(e)))?;
        Ok(Self {
            dir,
            generated_files: Vec::new(),
        })
    }

    /// Directory holding the generated files
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Files generated so far, in creation order
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Write a file with the given content
    pub fn file_with_content(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.dir.path().join(name);
        std::fs::write(&file_path, content)
            .map_err(|e| Error::Io(IoError::from_std(e).with_path(&file_path)))?;

        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Write a file of `size` deterministic bytes derived from `seed`
    pub fn deterministic_file(&mut self, name: &str, size: usize, seed: u64) -> Result<PathBuf> {
        self.file_with_content(name, &deterministic_bytes(size, seed))
    }
}
