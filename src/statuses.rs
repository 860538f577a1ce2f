//! Per-workspace workflow status configuration (`statuses/config.json`)
//!
//! The document is owned by the desktop shell; this module reads and validates
//! it, and falls back to the embedded defaults whenever it is missing or
//! unusable so the status list is never empty.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::collaborators::WorkspaceImageReader;
use crate::errors::{StatusConfigError, StatusConfigResult};

/// Newest document version this build understands
pub const STATUS_CONFIG_VERSION: u32 = 1;

pub const STATUS_CONFIG_PATH: &str = "statuses/config.json";

pub const STATUS_ICON_DIR: &str = "statuses/icons";

/// Probed in this order when discovering a status icon
pub const STATUS_ICON_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg"];

/// Statuses every configuration must carry
pub const REQUIRED_STATUS_IDS: &[&str] = &["todo", "done", "cancelled"];

pub const DEFAULT_STATUS_ID: &str = "todo";

/// Painted when a status has no icon
pub const BULLET_GLYPH: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDefinition {
    pub id: String,
    pub label: String,
    pub category: StatusCategory,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl StatusDefinition {
    fn builtin(id: &str, label: &str, category: StatusCategory, order: i32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
            is_fixed: REQUIRED_STATUS_IDS.contains(&id),
            is_default: id == DEFAULT_STATUS_ID,
            order,
            color: None,
            icon: None,
        }
    }

    /// Workspace paths probed for this status' icon, in priority order
    pub fn icon_candidates(&self) -> Vec<String> {
        STATUS_ICON_EXTENSIONS
            .iter()
            .map(|ext| format!("{STATUS_ICON_DIR}/{}.{ext}", self.id))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.category == StatusCategory::Closed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusConfig {
    pub version: u32,
    pub statuses: Vec<StatusDefinition>,
    pub default_status_id: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        use StatusCategory::{Closed, Open};

        Self {
            version: STATUS_CONFIG_VERSION,
            statuses: vec![
                StatusDefinition::builtin("backlog", "Backlog", Open, 0),
                StatusDefinition::builtin("todo", "Todo", Open, 1),
                StatusDefinition::builtin("needs-review", "Needs Review", Open, 2),
                StatusDefinition::builtin("done", "Done", Closed, 3),
                StatusDefinition::builtin("cancelled", "Cancelled", Closed, 4),
            ],
            default_status_id: DEFAULT_STATUS_ID.to_string(),
        }
    }
}

impl StatusConfig {
    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> StatusConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StatusConfigResult<()> {
        if self.version > STATUS_CONFIG_VERSION {
            return Err(StatusConfigError::UnsupportedVersion {
                version: self.version,
                max: STATUS_CONFIG_VERSION,
            });
        }

        let mut seen = HashSet::with_capacity(self.statuses.len());
        for (index, status) in self.statuses.iter().enumerate() {
            if status.id.trim().is_empty() {
                return Err(StatusConfigError::EmptyId { index });
            }
            if !seen.insert(status.id.as_str()) {
                return Err(StatusConfigError::DuplicateStatus {
                    id: status.id.clone(),
                });
            }
        }

        if let Some(missing) = REQUIRED_STATUS_IDS.iter().find(|id| !seen.contains(**id)) {
            return Err(StatusConfigError::MissingRequiredStatus {
                id: missing.to_string(),
            });
        }

        if !seen.contains(self.default_status_id.as_str()) {
            return Err(StatusConfigError::UnknownDefault {
                id: self.default_status_id.clone(),
            });
        }

        Ok(())
    }

    /// Read the workspace's status config, resetting to the defaults when the
    /// document is missing, corrupt or invalid.
    pub async fn load_or_default(reader: &dyn WorkspaceImageReader, workspace_id: &str) -> Self {
        let json = match reader
            .read_workspace_image(workspace_id, STATUS_CONFIG_PATH)
            .await
        {
            Ok(json) => json,
            Err(e) if e.is_not_found() => {
                debug!(
                    "No status config in workspace {}, using defaults",
                    workspace_id
                );
                return Self::default();
            }
            Err(e) => {
                warn!(
                    "Failed to read status config for workspace {}: {}; using defaults",
                    workspace_id, e
                );
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Invalid status config in workspace {}: {}; resetting to defaults",
                    workspace_id, e
                );
                Self::default()
            }
        }
    }

    /// Statuses ordered by `order`, ties keeping document order
    pub fn sorted(&self) -> Vec<&StatusDefinition> {
        let mut statuses: Vec<&StatusDefinition> = self.statuses.iter().collect();
        statuses.sort_by_key(|status| status.order);
        statuses
    }

    pub fn get(&self, id: &str) -> Option<&StatusDefinition> {
        self.statuses.iter().find(|status| status.id == id)
    }

    pub fn default_status(&self) -> Option<&StatusDefinition> {
        self.get(&self.default_status_id)
    }
}
