//! Resolved icon values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used by the legacy string encoding of emoji results
pub const EMOJI_MARKER_PREFIX: &str = "emoji:";

/// Outcome of a successful icon resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResolvedIcon {
    /// A single emoji grapheme, rendered as text
    Emoji(String),
    /// Something the renderer can load as an image: a data URL, a value
    /// returned verbatim by the workspace reader, or a remote favicon URL
    Url(String),
}

impl ResolvedIcon {
    pub fn value(&self) -> &str {
        match self {
            Self::Emoji(value) | Self::Url(value) => value,
        }
    }

    pub fn is_emoji(&self) -> bool {
        matches!(self, Self::Emoji(_))
    }

    /// Legacy single-string encoding: emojis carry the `emoji:` prefix, URLs are bare.
    pub fn to_marker_string(&self) -> String {
        match self {
            Self::Emoji(emoji) => format!("{EMOJI_MARKER_PREFIX}{emoji}"),
            Self::Url(url) => url.clone(),
        }
    }

    pub fn from_marker_string(value: &str) -> Self {
        match value.strip_prefix(EMOJI_MARKER_PREFIX) {
            Some(emoji) => Self::Emoji(emoji.to_string()),
            None => Self::Url(value.to_string()),
        }
    }
}

impl fmt::Display for ResolvedIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_marker_string())
    }
}
