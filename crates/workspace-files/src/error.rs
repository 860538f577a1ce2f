//! Error types for sandboxed workspace file access.

use std::path::PathBuf;

/// Result type for workspace file operations.
pub type Result<T> = std::result::Result<T, WorkspaceFileError>;

/// Errors that can occur while reading files inside a workspace sandbox.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceFileError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path validation failed - potential security issue
    #[error("Path validation failed: {path:?} - {reason}")]
    PathValidation { path: PathBuf, reason: String },

    /// File does not exist inside the sandbox
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Content could not be classified or is not an allowed type
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl WorkspaceFileError {
    /// True when the error means "nothing there" rather than a real failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileNotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
