//! Path validation for sandboxed workspace reads.

use crate::error::{Result, WorkspaceFileError};
use std::path::{Component, Path};

/// Validates a caller-supplied relative path before it is joined onto a sandbox base.
///
/// Rejects empty paths, null bytes, absolute paths and Windows prefixes. `..`
/// components are allowed here; the canonical check in
/// [`validate_path_within_sandbox`] decides whether they escape.
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WorkspaceFileError::PathValidation {
            path: path.into(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WorkspaceFileError::PathValidation {
            path: path.into(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    let path_obj = Path::new(path);
    if path_obj.is_absolute() {
        return Err(WorkspaceFileError::PathValidation {
            path: path.into(),
            reason: "Absolute paths not allowed - use paths relative to the workspace".to_string(),
        });
    }

    if path_obj
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(WorkspaceFileError::PathValidation {
            path: path.into(),
            reason: "Path carries a root or drive prefix".to_string(),
        });
    }

    Ok(())
}

/// Validates that a single path segment (e.g. a workspace id or slug) cannot
/// change directories when joined.
pub fn validate_segment(segment: &str) -> Result<()> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if bad {
        return Err(WorkspaceFileError::PathValidation {
            path: segment.into(),
            reason: "Not a single path segment".to_string(),
        });
    }
    Ok(())
}

/// Validates that a resolved path is within the specified sandbox directory.
/// Uses OS path resolution to handle symlinks, `..` and `.` properly.
///
/// A path that does not exist yields [`WorkspaceFileError::FileNotFound`]: this
/// sandbox is read-only, so there is nothing to resolve for missing files.
pub fn validate_path_within_sandbox(resolved_path: &Path, sandbox_base: &Path) -> Result<()> {
    let canonical_base =
        sandbox_base
            .canonicalize()
            .map_err(|e| WorkspaceFileError::PathValidation {
                path: sandbox_base.to_path_buf(),
                reason: format!("Failed to resolve sandbox base: {e}"),
            })?;

    if !resolved_path.exists() {
        return Err(WorkspaceFileError::FileNotFound {
            path: resolved_path.display().to_string(),
        });
    }

    let canonical_path =
        resolved_path
            .canonicalize()
            .map_err(|e| WorkspaceFileError::PathValidation {
                path: resolved_path.to_path_buf(),
                reason: format!("Failed to resolve path: {e}"),
            })?;

    if !canonical_path.starts_with(&canonical_base) {
        return Err(WorkspaceFileError::PathValidation {
            path: resolved_path.to_path_buf(),
            reason: format!(
                "Path escapes sandbox: resolves to '{}' (outside '{}')",
                canonical_path.display(),
                canonical_base.display()
            ),
        });
    }

    Ok(())
}
