//! Read-only sandbox rooted at a workspace directory.

use crate::{
    error::{Result, WorkspaceFileError},
    file_types::{FileTypeConfig, FileTypeInfo, FileTypeValidator},
    security::{validate_path_within_sandbox, validate_relative_path},
};

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;

/// An image read from the sandbox, with its detected content type.
#[derive(Debug, Clone)]
pub struct SandboxedImage {
    pub relative_path: String,
    pub content: Vec<u8>,
    pub file_type: FileTypeInfo,
}

impl SandboxedImage {
    /// Render the image the way the renderer consumes it: SVG markup verbatim,
    /// everything else as a base64 `data:` URL.
    #[must_use]
    pub fn into_renderable(self) -> String {
        if self.file_type.is_svg() {
            match String::from_utf8(self.content) {
                Ok(markup) => markup,
                Err(e) => self.file_type.to_data_url(e.as_bytes()),
            }
        } else {
            self.file_type.to_data_url(&self.content)
        }
    }
}

/// Read-only sandboxed view of one workspace directory.
///
/// Every path is validated against the canonical base directory before it is
/// touched; symlinks are allowed only when they resolve inside the sandbox.
#[derive(Clone)]
pub struct WorkspaceSandbox {
    base_dir: PathBuf,
    validator: Arc<FileTypeValidator>,
}

impl std::fmt::Debug for WorkspaceSandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceSandbox")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

impl WorkspaceSandbox {
    /// Create a new builder for configuring the sandbox.
    #[must_use]
    pub fn builder() -> WorkspaceSandboxBuilder {
        WorkspaceSandboxBuilder::new()
    }

    /// The directory every path is resolved against.
    #[must_use]
    pub fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    /// Sandboxed version of `std::fs::read` - reads entire file into a `Vec<u8>`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is invalid or resolves outside the sandbox
    /// - The file does not exist or cannot be read
    pub async fn read<P: AsRef<str>>(&self, path: P) -> Result<Vec<u8>> {
        let file_path = self.validate_and_get_path(path.as_ref())?;
        let content = fs::read(&file_path).await?;
        Ok(content)
    }

    /// Sandboxed version of `std::fs::read_to_string` - reads entire file into a `String`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is invalid or resolves outside the sandbox
    /// - The file cannot be read as UTF-8 text
    pub async fn read_to_string<P: AsRef<str>>(&self, path: P) -> Result<String> {
        let file_path = self.validate_and_get_path(path.as_ref())?;
        let content = fs::read_to_string(&file_path).await?;
        Ok(content)
    }

    /// Read an image and classify it by content.
    ///
    /// # Errors
    /// Returns an error if the read fails or the content is not an allowed image type.
    pub async fn read_image<P: AsRef<str>>(&self, path: P) -> Result<SandboxedImage> {
        let relative_path = path.as_ref().to_string();
        let content = self.read(&relative_path).await?;
        let file_type = self.validator.detect(&content)?;

        tracing::trace!(
            "Read {} ({}, {} bytes) from {:?}",
            relative_path,
            file_type.mime_type,
            content.len(),
            self.base_dir
        );

        Ok(SandboxedImage {
            relative_path,
            content,
            file_type,
        })
    }

    /// Validate a filepath and construct the full path within the sandbox.
    ///
    /// Unlike a writable sandbox nothing is created here; a missing file yields
    /// [`WorkspaceFileError::FileNotFound`].
    fn validate_and_get_path(&self, filepath: &str) -> Result<PathBuf> {
        validate_relative_path(filepath)?;

        let full_path = self.base_dir.join(filepath);
        validate_path_within_sandbox(&full_path, &self.base_dir)?;

        full_path
            .canonicalize()
            .map_err(|e| WorkspaceFileError::PathValidation {
                path: full_path.clone(),
                reason: format!("Failed to resolve existing file path: {e}"),
            })
    }
}

/// Builder for configuring a [`WorkspaceSandbox`].
pub struct WorkspaceSandboxBuilder {
    base_directory: Option<PathBuf>,
}

impl WorkspaceSandboxBuilder {
    fn new() -> Self {
        Self {
            base_directory: None,
        }
    }

    /// Set the workspace directory every path is resolved against.
    #[must_use]
    pub fn base_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.base_directory = Some(path.into());
        self
    }

    /// Build the `WorkspaceSandbox`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Base directory is not set
    /// - Base directory does not exist or is not a directory
    pub async fn build(self) -> Result<WorkspaceSandbox> {
        let base_dir = self
            .base_directory
            .ok_or_else(|| WorkspaceFileError::Configuration {
                message: "Base directory is required".to_string(),
            })?;

        let metadata = fs::metadata(&base_dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WorkspaceFileError::FileNotFound {
                    path: base_dir.display().to_string(),
                }
            } else {
                WorkspaceFileError::Io(e)
            }
        })?;
        if !metadata.is_dir() {
            return Err(WorkspaceFileError::Configuration {
                message: format!("{} is not a directory", base_dir.display()),
            });
        }

        let base_dir = fs::canonicalize(&base_dir).await?;

        tracing::debug!("WorkspaceSandbox opened - base_dir: {:?}", base_dir);

        Ok(WorkspaceSandbox {
            base_dir,
            validator: Arc::new(FileTypeValidator::with_config(FileTypeConfig::images())),
        })
    }
}
