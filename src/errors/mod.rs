//! Centralized error handling for workspace icon resolution
//!
//! The resolver itself never fails: every collaborator error degrades to "no
//! icon". These types exist for the layers around it.
//!
//! # Error Categories
//!
//! - **Collaborator Errors**: workspace file reads and favicon lookups
//! - **Status Config Errors**: invalid `statuses/config.json` documents
//! - **Application Errors**: configuration loading and CLI plumbing
//!
//! # Usage
//!
//! ```rust
//! use workspace_icons::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("theme.fallback_color must not be empty"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Convenience type alias for status configuration validation
pub type StatusConfigResult<T> = Result<T, StatusConfigError>;
