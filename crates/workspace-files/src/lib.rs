//! # Workspace Files
//!
//! Read-only, sandboxed access to the files of an agent workspace, with magic
//! number-based content detection for the images a workspace carries (source,
//! skill and status icons).
//!
//! ## Features
//!
//! - **Sandboxed Reads**: every path is resolved against one base directory
//! - **Nested Path Support**: `sources/linear/icon.svg` style paths
//! - **Path Canonicalization**: `../`, symlinks and relative segments are resolved
//!   by the OS before the sandbox check, so escapes are caught after resolution
//! - **Content Detection**: raster types by signature (via `infer`), SVG by
//!   sniffing the document root
//! - **Renderer Friendly Output**: SVG markup verbatim, rasters as `data:` URLs
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use workspace_files::WorkspaceSandbox;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sandbox = WorkspaceSandbox::builder()
//!     .base_directory("/home/me/.agent/workspaces/default")
//!     .build()
//!     .await?;
//!
//! let markup = sandbox.read_to_string("sources/linear/icon.svg").await?;
//! let image = sandbox.read_image("statuses/icons/done.png").await?;
//! println!("{} -> {}", markup.len(), image.into_renderable());
//! # Ok(())
//! # }
//! ```
//!
//! ## Blocked operations
//!
//! ```rust,ignore
//! // These fail with WorkspaceFileError::PathValidation:
//! // sandbox.read("../../../etc/passwd").await?;   // Escapes sandbox
//! // sandbox.read("/etc/passwd").await?;           // Absolute path
//! // sandbox.read("file\0.txt").await?;            // Null bytes
//! ```

pub mod error;
pub mod file_types;
pub mod sandbox;
pub mod security;

pub use error::{Result, WorkspaceFileError};
pub use file_types::{
    FileTypeConfig, FileTypeConfigBuilder, FileTypeInfo, FileTypeValidator, SVG_MIME_TYPE,
};
pub use sandbox::{SandboxedImage, WorkspaceSandbox, WorkspaceSandboxBuilder};
pub use security::validate_segment;
