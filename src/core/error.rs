//! Error types for treepeek

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for treepeek operations
#[derive(Error, Debug)]
pub enum PeekError {
    /// The ignore file could not be opened or read. This is the only error
    /// the matcher ever surfaces: malformed pattern text is never an error.
    #[error("Failed to load ignore file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scan root errors
    #[error("Scan root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Scan root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// File content errors
    #[error("File too large (max {max}): {path}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max: bytesize::ByteSize,
    },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PeekError {
    /// Create a new ignore file error
    pub fn ignore_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IgnoreFile {
            path: path.into(),
            source,
        }
    }

    /// Create a new root not found error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Create a new root not a directory error
    pub fn root_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::RootNotDirectory { path: path.into() }
    }

    /// Create a new file too large error
    pub fn file_too_large(path: impl Into<PathBuf>, size: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            size,
            max: bytesize::ByteSize::b(max),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for treepeek operations
pub type Result<T> = std::result::Result<T, PeekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_file_error_keeps_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = PeekError::ignore_file("/tmp/.gitignore", io_error);

        let message = error.to_string();
        assert!(message.contains("/tmp/.gitignore"));
        assert!(message.contains("missing"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_file_too_large_display() {
        let error = PeekError::file_too_large("big.bin", 20 * 1024 * 1024, 10 * 1024 * 1024);
        let message = error.to_string();
        assert!(message.contains("File too large"));
        assert!(message.contains("big.bin"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: PeekError = io_error.into();
        assert!(matches!(error, PeekError::Io(_)));
    }
}
