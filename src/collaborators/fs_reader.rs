use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use workspace_files::{WorkspaceFileError, WorkspaceSandbox, validate_segment};

use super::WorkspaceImageReader;
use crate::errors::{CollaboratorError, CollaboratorResult};

/// Workspace reader backed by the local filesystem.
///
/// Each workspace is a directory under `root` and is read through its own
/// sandbox. Images come back the way the renderer consumes them: SVG and other
/// text verbatim, rasters as `data:` URLs.
pub struct FsWorkspaceImageReader {
    root: PathBuf,
    sandboxes: RwLock<HashMap<String, WorkspaceSandbox>>,
}

impl FsWorkspaceImageReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sandboxes: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn sandbox(&self, workspace_id: &str) -> CollaboratorResult<WorkspaceSandbox> {
        let cached = self.sandboxes.read().get(workspace_id).cloned();
        if let Some(sandbox) = cached {
            return Ok(sandbox);
        }

        validate_segment(workspace_id).map_err(|_| CollaboratorError::InvalidWorkspace {
            workspace_id: workspace_id.to_string(),
        })?;

        let sandbox = WorkspaceSandbox::builder()
            .base_directory(self.root.join(workspace_id))
            .build()
            .await?;

        debug!(
            "Opened workspace {} at {:?}",
            workspace_id,
            sandbox.base_directory()
        );

        let mut sandboxes = self.sandboxes.write();
        Ok(sandboxes
            .entry(workspace_id.to_string())
            .or_insert(sandbox)
            .clone())
    }
}

#[async_trait]
impl WorkspaceImageReader for FsWorkspaceImageReader {
    async fn read_workspace_image(
        &self,
        workspace_id: &str,
        relative_path: &str,
    ) -> CollaboratorResult<String> {
        let sandbox = self.sandbox(workspace_id).await?;

        match sandbox.read_image(relative_path).await {
            Ok(image) => Ok(image.into_renderable()),
            // config documents and other text files
            Err(WorkspaceFileError::UnsupportedContentType { .. }) => {
                Ok(sandbox.read_to_string(relative_path).await?)
            }
            Err(e) if e.is_not_found() => Err(CollaboratorError::NotFound {
                workspace_id: workspace_id.to_string(),
                path: relative_path.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
