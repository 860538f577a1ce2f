use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub icons: IconConfig,
    #[serde(default)]
    pub favicon: FaviconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per workspace id
    #[serde(default = "default_workspaces_root")]
    pub workspaces_root: PathBuf,
}

/// Colour resolution for themed SVG icons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Custom property read from the live theme
    #[serde(default = "default_color_property")]
    pub color_property: String,
    /// Colour used when the theme yields nothing
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    /// Share one resolution between concurrent callers for the same key
    #[serde(default = "default_dedupe_in_flight")]
    pub dedupe_in_flight: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaviconConfig {
    #[serde(default = "default_favicon_enabled")]
    pub enabled: bool,
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Fallback favicon service; `{domain}` is replaced with the brand domain
    #[serde(default = "default_service_template")]
    pub service_template: Option<String>,
}

fn default_workspaces_root() -> PathBuf {
    PathBuf::from(DEFAULT_WORKSPACES_ROOT)
}

fn default_color_property() -> String {
    DEFAULT_COLOR_PROPERTY.to_string()
}

fn default_fallback_color() -> String {
    DEFAULT_FALLBACK_COLOR.to_string()
}

fn default_dedupe_in_flight() -> bool {
    DEFAULT_DEDUPE_IN_FLIGHT
}

fn default_favicon_enabled() -> bool {
    DEFAULT_FAVICON_ENABLED
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FAVICON_CONNECT_TIMEOUT_SECS)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FAVICON_REQUEST_TIMEOUT_SECS)
}

fn default_user_agent() -> String {
    DEFAULT_FAVICON_USER_AGENT.to_string()
}

fn default_service_template() -> Option<String> {
    Some(DEFAULT_FAVICON_SERVICE_TEMPLATE.to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            workspaces_root: default_workspaces_root(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_property: default_color_property(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            dedupe_in_flight: default_dedupe_in_flight(),
        }
    }
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            enabled: default_favicon_enabled(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            service_template: default_service_template(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_from_file(&Self::config_file(None))
    }

    /// Config file to use: an explicit path, else `WORKSPACE_ICONS_CONFIG`,
    /// else the default file name.
    pub fn config_file(explicit: Option<&str>) -> String {
        Self::select_config_file(explicit, std::env::var(CONFIG_FILE_ENV).ok())
    }

    fn select_config_file(explicit: Option<&str>, from_env: Option<String>) -> String {
        explicit
            .map(str::to_string)
            .or(from_env)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Load configuration, writing a default file first if none exists.
    pub fn load_from_file(config_file: &str) -> AppResult<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str::<Self>(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.theme.color_property.trim().is_empty() {
            return Err(AppError::configuration(
                "theme.color_property must not be empty",
            ));
        }
        if self.theme.fallback_color.trim().is_empty() {
            return Err(AppError::configuration(
                "theme.fallback_color must not be empty",
            ));
        }
        if let Some(template) = &self.favicon.service_template
            && !template.contains("{domain}")
        {
            return Err(AppError::configuration(format!(
                "favicon.service_template must contain {{domain}}: {template}"
            )));
        }
        if self.favicon.request_timeout.is_zero() {
            return Err(AppError::configuration(
                "favicon.request_timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}
