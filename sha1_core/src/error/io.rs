//! I/O errors raised while reading input to be hashed

use std::path::{Path, PathBuf};
use thiserror::Error;

/// I/O error with the path being hashed, when known
#[derive(Error, Debug)]
#[error("{}", describe(self))]
pub struct IoError {
    pub kind: IoErrorKind,
    pub path: Option<PathBuf>,
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    /// Input path does not exist
    FileNotFound,
    /// Input path exists but cannot be opened
    PermissionDenied,
    /// Input path names a directory, which has no byte content to digest
    IsDirectory,
    /// Reading failed part way through the input
    Read,
}

impl IoError {
    /// Create a file not found error
    pub fn file_not_found(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::FileNotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: &Path, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::PermissionDenied,
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Create an error for a directory passed where a file was expected
    pub fn is_directory(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::IsDirectory,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Classify a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            std::io::ErrorKind::IsADirectory => IoErrorKind::IsDirectory,
            _ => IoErrorKind::Read,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Attach the input path
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn describe(error: &IoError) -> String {
    let subject = match &error.path {
        Some(path) => path.display().to_string(),
        None => "<stream>".to_string(),
    };

    match error.kind {
        IoErrorKind::FileNotFound => format!("File not found: {subject}"),
        IoErrorKind::PermissionDenied => format!("Permission denied: {subject}"),
        IoErrorKind::IsDirectory => format!("Is a directory: {subject}"),
        IoErrorKind::Read => match &error.source {
            Some(source) => format!("Failed to read {subject}: {source}"),
            None => format!("Failed to read {subject}"),
        },
    }
}
