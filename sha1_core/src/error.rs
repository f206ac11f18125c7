//! Error types for the SHA-1 core library
//!
//! Errors are organized into logical categories, one module per category.

use thiserror::Error;

pub mod digest;
pub mod io;
pub mod validation;

pub use self::digest::DigestError;
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SHA-1 core library
///
/// Errors are categorized into three main types:
/// - Digest errors: misuse of the digest engine itself
/// - I/O errors: reading files and streams to be hashed
/// - Validation errors: configuration and textual digest parsing
#[derive(Error, Debug)]
pub enum Error {
    /// Digest engine errors
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/non/existent/file.iso");
        let error = Error::Io(IoError::file_not_found(path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_length_overflow_error() {
        let error = Error::Digest(DigestError::length_overflow(10, 20));

        assert!(matches!(
            error,
            Error::Digest(DigestError::LengthOverflow { .. })
        ));
        assert!(error.to_string().contains("Input length overflow"));
    }

    #[test]
    fn test_invalid_configuration_error() {
        let message = "chunk_size must be greater than zero";
        let error = Error::Validation(ValidationError::invalid_configuration(message));

        assert!(matches!(
            error,
            Error::Validation(ValidationError::InvalidConfiguration { .. })
        ));
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = Error::Digest(DigestError::length_overflow(1, 1));

        let _: &dyn StdError = &error;
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let path = Path::new("/test/file.iso");
        let error = Error::Io(IoError::permission_denied(path, io_error));

        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Io(IoError::file_not_found(Path::new("test.bin"))),
            Error::Digest(DigestError::length_overflow(64, 128)),
            Error::Validation(ValidationError::invalid_configuration("Invalid setting")),
            Error::Validation(ValidationError::invalid_digest("xyz", "not hex")),
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(!display_string.is_empty());
        }
    }
}
