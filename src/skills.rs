//! Skill configuration and icon path parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SKILL_ICON_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*[/\\]skills[/\\]([^/\\]+)[/\\](.+)$").expect("valid skill icon path pattern")
});

/// A skill with the absolute path of its icon on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillConfig {
    pub slug: String,
    #[serde(default)]
    pub icon_path: Option<String>,
}

impl SkillConfig {
    pub fn new(slug: impl Into<String>, icon_path: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            icon_path: Some(icon_path.into()),
        }
    }

    /// Build a config from an icon path alone, taking the slug from the path.
    pub fn from_icon_path(icon_path: &str) -> Option<Self> {
        let location = SkillIconLocation::parse(icon_path)?;
        Some(Self::new(location.slug, icon_path))
    }
}

/// Where a skill icon lives inside its workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillIconLocation {
    pub slug: String,
    /// Path below the skill directory, always `/`-separated
    pub remainder: String,
}

impl SkillIconLocation {
    /// Extract `{slug}` and `{remainder}` from `…/skills/{slug}/{remainder}`.
    /// The last `skills` segment in the path is used.
    pub fn parse(absolute_path: &str) -> Option<Self> {
        let captures = SKILL_ICON_PATH.captures(absolute_path)?;
        let slug = captures.get(1)?.as_str();
        let remainder = captures.get(2)?.as_str().replace('\\', "/");

        if remainder.trim_matches('/').is_empty() {
            return None;
        }

        Some(Self {
            slug: slug.to_string(),
            remainder,
        })
    }

    /// Workspace-relative path handed to the file reader
    pub fn workspace_path(&self) -> String {
        format!("skills/{}/{}", self.slug, self.remainder)
    }
}
