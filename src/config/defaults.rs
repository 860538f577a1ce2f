/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Config file defaults
pub const DEFAULT_CONFIG_FILE: &str = "workspace-icons.toml";
pub const CONFIG_FILE_ENV: &str = "WORKSPACE_ICONS_CONFIG";

// Storage defaults
pub const DEFAULT_WORKSPACES_ROOT: &str = "./data/workspaces";

// Theme defaults
pub const DEFAULT_COLOR_PROPERTY: &str = "--foreground";
// Used when no live theme is available (CLI, tests, headless rendering)
pub const DEFAULT_FALLBACK_COLOR: &str = "#3b3b3b";

// Icon resolution defaults
pub const DEFAULT_DEDUPE_IN_FLIGHT: bool = true;

// Favicon lookup defaults
pub const DEFAULT_FAVICON_ENABLED: bool = true;
pub const DEFAULT_FAVICON_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_FAVICON_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FAVICON_USER_AGENT: &str = concat!("workspace-icons/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_FAVICON_SERVICE_TEMPLATE: &str =
    "https://www.google.com/s2/favicons?domain={domain}&sz=128";
