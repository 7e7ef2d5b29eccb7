// Centralized error handling module
// Provides context-rich error types for hashing, comparison and digest encoding

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the hash utility
///
/// Every file system failure collapses into the single `FileAccess` kind;
/// the underlying `io::Error` stays attached as the cause. Cancellation is
/// not represented here because it is not a failure.
#[derive(Debug)]
pub enum HashError {
    /// Unknown or unavailable digest algorithm
    UnsupportedAlgorithm { name: String },

    /// Any file system failure: missing file, permissions, read or write errors
    FileAccess {
        path: Option<PathBuf>,
        operation: String,
        source: io::Error,
    },

    /// Digest text that is not valid for the claimed encoding
    MalformedEncodedInput { encoding: String, reason: String },

    /// Comparison requested with fewer than two inputs
    InsufficientInputs { supplied: usize },
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashError::UnsupportedAlgorithm { name } => {
                write!(f, "Unsupported digest algorithm: {}\n", name)?;
                write!(f, "Suggestion: Use --list to see the supported algorithms")
            }
            HashError::FileAccess { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "File access error while {} {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "File access error while {}: {}\n", operation, source)?;
                }
                match source.kind() {
                    io::ErrorKind::NotFound => {
                        write!(f, "Suggestion: Check that the file path is correct and the file exists")
                    }
                    io::ErrorKind::PermissionDenied => {
                        write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
                    }
                    _ => write!(f, "Suggestion: Check file permissions and disk space"),
                }
            }
            HashError::MalformedEncodedInput { encoding, reason } => {
                write!(f, "Malformed {} input: {}\n", encoding, reason)?;
                write!(f, "Suggestion: Check that the digest text matches the selected encoding")
            }
            HashError::InsufficientInputs { supplied } => {
                write!(f, "Comparison needs at least two files, got {}\n", supplied)?;
                write!(f, "Suggestion: Supply two or more file paths to compare")
            }
        }
    }
}

impl std::error::Error for HashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashError::FileAccess { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Conversion from io::Error with context
impl HashError {
    /// Create a FileAccess error with context about the operation and optional path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        HashError::FileAccess {
            path,
            operation: operation.to_string(),
            source: err,
        }
    }
}

// Default From implementation for io::Error (without context)
impl From<io::Error> for HashError {
    fn from(err: io::Error) -> Self {
        HashError::from_io_error(err, "accessing a file", None)
    }
}
