//! Static metadata for the models the UI can select

use regex::Regex;
use std::sync::LazyLock;

static DATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d{8}$").expect("valid date suffix pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub short_name: &'static str,
    pub provider: &'static str,
    pub context_window: u64,
    pub max_output_tokens: u64,
}

pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "claude-sonnet-4-5-20250929",
        display_name: "Claude Sonnet 4.5",
        short_name: "Sonnet 4.5",
        provider: "anthropic",
        context_window: 200_000,
        max_output_tokens: 64_000,
    },
    ModelInfo {
        id: "claude-opus-4-1-20250805",
        display_name: "Claude Opus 4.1",
        short_name: "Opus 4.1",
        provider: "anthropic",
        context_window: 200_000,
        max_output_tokens: 32_000,
    },
    ModelInfo {
        id: "claude-haiku-4-5-20251001",
        display_name: "Claude Haiku 4.5",
        short_name: "Haiku 4.5",
        provider: "anthropic",
        context_window: 200_000,
        max_output_tokens: 64_000,
    },
    ModelInfo {
        id: "claude-sonnet-4-20250514",
        display_name: "Claude Sonnet 4",
        short_name: "Sonnet 4",
        provider: "anthropic",
        context_window: 1_000_000,
        max_output_tokens: 64_000,
    },
    ModelInfo {
        id: "claude-3-5-haiku-20241022",
        display_name: "Claude Haiku 3.5",
        short_name: "Haiku 3.5",
        provider: "anthropic",
        context_window: 200_000,
        max_output_tokens: 8_192,
    },
];

/// Id without a `provider/` prefix or a trailing `-YYYYMMDD` date
pub fn clean_model_id(id: &str) -> String {
    let without_provider = id.rsplit_once('/').map_or(id, |(_, rest)| rest);
    DATE_SUFFIX.replace(without_provider, "").into_owned()
}

/// Look a model up by exact id, then by provider-less id.
pub fn get_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id).or_else(|| {
        let without_provider = id.rsplit_once('/')?.1;
        MODELS.iter().find(|m| m.id == without_provider)
    })
}

pub fn display_name(id: &str) -> String {
    get_model(id)
        .map(|m| m.display_name.to_string())
        .unwrap_or_else(|| clean_model_id(id))
}

pub fn short_name(id: &str) -> String {
    get_model(id)
        .map(|m| m.short_name.to_string())
        .unwrap_or_else(|| clean_model_id(id))
}

/// `950`, `1.5K`, `200K`, `1M`, `1.5M`
pub fn format_token_count(tokens: u64) -> String {
    fn scaled(value: f64, suffix: &str) -> String {
        let formatted = format!("{value:.1}");
        let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
        format!("{trimmed}{suffix}")
    }

    if tokens >= 1_000_000 {
        scaled(tokens as f64 / 1_000_000.0, "M")
    } else if tokens >= 1_000 {
        scaled(tokens as f64 / 1_000.0, "K")
    } else {
        tokens.to_string()
    }
}

pub fn format_context_window(id: &str) -> Option<String> {
    get_model(id).map(|m| format_token_count(m.context_window))
}
