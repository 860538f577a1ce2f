//! SVG theming for icons painted as CSS background images
//!
//! Background images do not inherit the text colour, so SVGs authored against
//! `currentColor` would render black. The themer bakes a concrete colour into
//! the markup: every `currentColor` token is replaced and the root `<svg>` tag
//! gets a `fill` when it has none of its own.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::ThemeConfig;
use crate::config::defaults::{DEFAULT_COLOR_PROPERTY, DEFAULT_FALLBACK_COLOR};

static CURRENT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)currentcolor").expect("valid currentColor pattern"));

static SVG_ROOT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg\b[^>]*>").expect("valid svg root pattern"));

static FILL_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sfill\s*="#).expect("valid fill attribute pattern"));

/// Synchronous read of named custom properties from the active presentation
/// context. Headless contexts return `None`.
pub trait ThemeColorSource: Send + Sync {
    fn custom_property(&self, name: &str) -> Option<String>;
}

/// Theme source for non-interactive contexts; never yields a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTheme;

impl ThemeColorSource for NoTheme {
    fn custom_property(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Fixed set of custom properties, e.g. a snapshot of the renderer's theme.
#[derive(Debug, Clone, Default)]
pub struct StaticTheme {
    properties: HashMap<String, String>,
}

impl StaticTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl ThemeColorSource for StaticTheme {
    fn custom_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

/// Resolves the colour injected into SVG icons.
pub struct SvgThemer {
    theme: Box<dyn ThemeColorSource>,
    color_property: String,
    fallback_color: String,
}

impl std::fmt::Debug for SvgThemer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgThemer")
            .field("color_property", &self.color_property)
            .field("fallback_color", &self.fallback_color)
            .finish_non_exhaustive()
    }
}

impl Default for SvgThemer {
    fn default() -> Self {
        Self::new(NoTheme)
    }
}

impl SvgThemer {
    pub fn new(theme: impl ThemeColorSource + 'static) -> Self {
        Self {
            theme: Box::new(theme),
            color_property: DEFAULT_COLOR_PROPERTY.to_string(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }

    pub fn from_config(theme: impl ThemeColorSource + 'static, config: &ThemeConfig) -> Self {
        Self {
            theme: Box::new(theme),
            color_property: config.color_property.clone(),
            fallback_color: config.fallback_color.clone(),
        }
    }

    /// Explicit colour, else the live theme's custom property, else the fallback.
    pub fn resolve_color(&self, color: Option<&str>) -> String {
        if let Some(explicit) = color.map(str::trim).filter(|c| !c.is_empty()) {
            return explicit.to_string();
        }

        self.theme
            .custom_property(&self.color_property)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.fallback_color.clone())
    }

    pub fn theme_svg_content(&self, svg: &str, color: Option<&str>) -> String {
        theme_svg_with_color(svg, &self.resolve_color(color))
    }

    pub fn svg_to_themed_data_url(&self, svg: &str, color: Option<&str>) -> String {
        svg_data_url(&self.theme_svg_content(svg, color))
    }
}

/// Apply a concrete colour to SVG markup.
///
/// `currentColor` is replaced case-insensitively everywhere. A `fill` attribute
/// is injected into the root `<svg>` tag only, and only when the root has no
/// `fill` of its own (`fill="none"` included).
pub fn theme_svg_with_color(svg: &str, color: &str) -> String {
    let themed = CURRENT_COLOR.replace_all(svg, regex::NoExpand(color));

    let Some(root) = SVG_ROOT_TAG.find(&themed) else {
        return themed.into_owned();
    };

    let root_tag = root.as_str();
    if FILL_ATTRIBUTE.is_match(root_tag) {
        return themed.into_owned();
    }

    let insert_at = root.start() + "<svg".len();
    let mut out = String::with_capacity(themed.len() + color.len() + 8);
    out.push_str(&themed[..insert_at]);
    out.push_str(" fill=\"");
    out.push_str(color);
    out.push('"');
    out.push_str(&themed[insert_at..]);
    out
}

/// Base64-encode markup into a `data:image/svg+xml` URL.
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// Theme with an explicit colour (or the headless fallback) without a live theme.
pub fn theme_svg_content(svg: &str, color: Option<&str>) -> String {
    SvgThemer::default().theme_svg_content(svg, color)
}

/// Theme then encode, using an explicit colour or the headless fallback.
pub fn svg_to_themed_data_url(svg: &str, color: Option<&str>) -> String {
    SvgThemer::default().svg_to_themed_data_url(svg, color)
}

/// True when `content` is SVG markup rather than a URL or other text.
///
/// Workspace files are classified by content, so a file named `logo` or a
/// misnamed `icon.png` holding SVG still counts.
pub fn is_svg_markup(content: &str) -> bool {
    content.trim_start().starts_with('<') && SVG_ROOT_TAG.is_match(content)
}
