//! Error types for backsync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for backsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed line in a config file
    #[error("{path}:{line}: {message}")]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Source and destination resolve to the same file
    #[error("Source and destination are the same file: {path}")]
    SameFile { path: PathBuf },

    /// A source directory could not be listed
    #[error("Source directory {path} could not be accessed: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SyncError {
    /// Check if this error invalidates a whole request
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SyncError::Validation(_) | SyncError::Config(_) | SyncError::ConfigParse { .. }
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            SyncError::PermissionDenied { .. } => true,
            SyncError::Io(e) | SyncError::DirectoryUnreadable { source: e, .. } => {
                e.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Classify an IO error raised while copying `path`.
    pub fn from_copy_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            SyncError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Io(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let sync_error: SyncError = io_error.into();

        assert!(matches!(sync_error, SyncError::Io(_)));
        assert!(sync_error.to_string().contains("IO error"));
    }

    #[test]
    fn test_io_error_from_function() {
        fn returns_io_error() -> Result<(), SyncError> {
            let _file = std::fs::File::open("/nonexistent/path/file.txt")?;
            Ok(())
        }

        let result = returns_io_error();
        assert!(matches!(result, Err(SyncError::Io(_))));
    }

    #[test]
    fn test_validation_errors() {
        assert!(SyncError::Config("bad".to_string()).is_validation_error());
        assert!(SyncError::Validation("bad".to_string()).is_validation_error());
        assert!(SyncError::ConfigParse {
            path: PathBuf::from("backup.conf"),
            line: 3,
            message: "unknown key".to_string(),
        }
        .is_validation_error());
        assert!(!SyncError::SameFile {
            path: PathBuf::from("a")
        }
        .is_validation_error());
    }

    #[test]
    fn test_config_parse_display_has_location() {
        let error = SyncError::ConfigParse {
            path: PathBuf::from("backup.conf"),
            line: 7,
            message: "missing ':'".to_string(),
        };
        assert_eq!(error.to_string(), "backup.conf:7: missing ':'");
    }

    #[test]
    fn test_from_copy_io_classifies_permission_denied() {
        let error = SyncError::from_copy_io(
            std::path::Path::new("/src/a.txt"),
            IoError::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(error, SyncError::PermissionDenied { .. }));
        assert!(error.is_permission_error());

        let other = SyncError::from_copy_io(
            std::path::Path::new("/src/a.txt"),
            IoError::new(ErrorKind::Other, "boom"),
        );
        assert!(matches!(other, SyncError::Io(_)));
        assert!(!other.is_permission_error());
    }

    #[test]
    fn test_directory_unreadable_permission() {
        let error = SyncError::DirectoryUnreadable {
            path: PathBuf::from("/locked"),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.is_permission_error());
        assert!(error.to_string().contains("/locked"));
    }
}
