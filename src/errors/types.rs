//! Error type definitions for workspace icon resolution

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Collaborator failures surfaced outside the resolver (CLI, loaders)
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Status configuration errors
    #[error("Status config error: {0}")]
    StatusConfig(#[from] StatusConfigError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file parse errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file serialization errors
    #[error("Configuration serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// JSON errors from workspace documents
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the external collaborators the resolver consumes
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The requested workspace file does not exist or is not readable
    #[error("Workspace file not found: {workspace_id}/{path}")]
    NotFound { workspace_id: String, path: String },

    /// The workspace id itself is unusable
    #[error("Invalid workspace id: {workspace_id}")]
    InvalidWorkspace { workspace_id: String },

    /// Sandboxed file access failed for a reason other than absence
    #[error("Workspace file error: {0}")]
    WorkspaceFile(#[from] workspace_files::WorkspaceFileError),

    /// Transport-level failure talking to a remote service
    #[error("Transport error: {url} - {message}")]
    Transport { url: String, message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service URL could not be parsed
    #[error("Invalid service URL: {url} - {message}")]
    InvalidUrl { url: String, message: String },
}

/// Validation failures for a workspace status configuration document
#[derive(Error, Debug)]
pub enum StatusConfigError {
    /// Document is not valid JSON for the schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document version is newer than this build understands
    #[error("Unsupported version: {version} (max: {max})")]
    UnsupportedVersion { version: u32, max: u32 },

    /// One of the fixed statuses is missing
    #[error("Missing required status: {id}")]
    MissingRequiredStatus { id: String },

    /// Status ids must be unique
    #[error("Duplicate status id: {id}")]
    DuplicateStatus { id: String },

    /// Status ids must be non-empty
    #[error("Status at position {index} has an empty id")]
    EmptyId { index: usize },

    /// `defaultStatusId` does not refer to a configured status
    #[error("Default status {id} is not defined")]
    UnknownDefault { id: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl CollaboratorError {
    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// True when the error only means "nothing there"
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::WorkspaceFile(e) => e.is_not_found(),
            _ => false,
        }
    }
}
