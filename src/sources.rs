//! Source (connector) configuration as read from `sources/{slug}/config.json`

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

use crate::collaborators::WorkspaceImageReader;
use crate::errors::{AppError, AppResult};
use crate::icons::emoji::is_emoji;

/// Prefix marking an icon file that lives next to the source config
pub const LOCAL_ICON_PREFIX: &str = "./";

/// Files probed when a source has no usable explicit icon
pub const SOURCE_ICON_CANDIDATES: &[&str] = &["icon.svg", "icon.png"];

/// Connector flavour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Mcp,
    Api,
    Local,
    #[default]
    Unknown,
    Other(String),
}

impl From<String> for SourceType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "mcp" => Self::Mcp,
            "api" => Self::Api,
            "local" => Self::Local,
            "" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

impl From<SourceType> for String {
    fn from(value: SourceType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mcp => f.write_str("mcp"),
            Self::Api => f.write_str("api"),
            Self::Local => f.write_str("local"),
            Self::Unknown => Ok(()),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// The configured `icon` field, classified once when the config is parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum IconSpec {
    /// A single emoji grapheme
    Emoji(String),
    /// File name relative to the source directory, `./` marker removed
    LocalPath(String),
    /// An http(s) URL. Never fetched directly; the chain continues with
    /// auto-discovery and favicon lookup.
    RemoteUrl(String),
    /// Anything else, e.g. a named icon the renderer may know about
    Named(String),
}

impl IconSpec {
    /// Classify a raw icon string. Surrounding whitespace is not part of the
    /// icon: `"🔥 "` is the emoji `🔥`. Blank strings are no icon at all.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        if is_emoji(value) {
            return Some(Self::Emoji(value.to_string()));
        }

        if let Some(file_name) = value.strip_prefix(LOCAL_ICON_PREFIX) {
            if file_name.is_empty() {
                return None;
            }
            return Some(Self::LocalPath(file_name.to_string()));
        }

        let lower = value.to_ascii_lowercase();
        if lower.starts_with("https://") || lower.starts_with("http://") {
            return Some(Self::RemoteUrl(value.to_string()));
        }

        Some(Self::Named(value.to_string()))
    }
}

impl From<IconSpec> for String {
    fn from(value: IconSpec) -> Self {
        match value {
            IconSpec::LocalPath(file_name) => format!("{LOCAL_ICON_PREFIX}{file_name}"),
            IconSpec::Emoji(v) | IconSpec::RemoteUrl(v) | IconSpec::Named(v) => v,
        }
    }
}

fn deserialize_icon<'de, D>(deserializer: D) -> Result<Option<IconSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(IconSpec::parse))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpSettings {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// A configured source. Only the fields icon resolution needs are modelled;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_icon",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<IconSpec>,
}

impl SourceConfig {
    pub fn new(slug: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            slug: slug.into(),
            source_type,
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, raw: &str) -> Self {
        self.icon = IconSpec::parse(raw);
        self
    }

    pub fn with_mcp_url(mut self, url: impl Into<String>) -> Self {
        self.mcp = Some(McpSettings {
            url: Some(url.into()),
        });
        self
    }

    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = Some(ApiSettings {
            base_url: Some(base_url.into()),
        });
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// URL used for favicon lookup. Only MCP and API sources have one.
    pub fn service_url(&self) -> Option<&str> {
        let url = match self.source_type {
            SourceType::Mcp => self.mcp.as_ref()?.url.as_deref(),
            SourceType::Api => self.api.as_ref()?.base_url.as_deref(),
            _ => None,
        }?;
        let url = url.trim();
        (!url.is_empty()).then_some(url)
    }

    /// Provider hint for favicon lookup, falling back to the slug
    pub fn provider_or_slug(&self) -> &str {
        self.provider
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.slug)
    }

    pub fn config_path(slug: &str) -> String {
        format!("sources/{slug}/config.json")
    }

    /// Parse a config document. A missing slug is taken from the directory name.
    pub fn from_json(json: &str, slug: &str) -> AppResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.slug.trim().is_empty() {
            config.slug = slug.to_string();
        }
        if config.slug.trim().is_empty() {
            return Err(AppError::configuration("source config has no slug"));
        }
        Ok(config)
    }

    /// Load `sources/{slug}/config.json` through the workspace reader.
    pub async fn load(
        reader: &dyn WorkspaceImageReader,
        workspace_id: &str,
        slug: &str,
    ) -> AppResult<Self> {
        let path = Self::config_path(slug);
        let json = reader.read_workspace_image(workspace_id, &path).await?;
        let config = Self::from_json(&json, slug)?;
        debug!(
            "Loaded source config {}/{} (type: {}, icon: {:?})",
            workspace_id, config.slug, config.source_type, config.icon
        );
        Ok(config)
    }
}
