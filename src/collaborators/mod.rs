//! Contracts for the privileged-process services the resolver depends on
//!
//! The desktop shell supplies its own implementations over IPC. The reference
//! implementations here let the resolution chain run headless:
//!
//! - [`FsWorkspaceImageReader`]: sandboxed reads under a workspaces root
//! - [`HttpFaviconResolver`]: favicon probing over HTTPS

use async_trait::async_trait;

use crate::errors::CollaboratorResult;

pub mod favicon;
pub mod fs_reader;

pub use favicon::HttpFaviconResolver;
pub use fs_reader::FsWorkspaceImageReader;

/// Reads a file from a workspace in a form the renderer accepts.
///
/// Any error is treated as "not found" by the resolver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceImageReader: Send + Sync {
    async fn read_workspace_image(
        &self,
        workspace_id: &str,
        relative_path: &str,
    ) -> CollaboratorResult<String>;
}

/// Finds a logo for a remote service.
///
/// `provider` is the configured provider name, or the source slug when none
/// is set. `Ok(None)` means no logo exists; errors are transport failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogoUrlResolver: Send + Sync {
    async fn get_logo_url(
        &self,
        service_url: &str,
        provider: &str,
    ) -> CollaboratorResult<Option<String>>;
}
