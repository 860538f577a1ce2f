//! Emoji literal detection for configured icon strings

use regex::Regex;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Longest emoji accepted, in UTF-16 code units. Bounds pathological input.
pub const MAX_EMOJI_UTF16_UNITS: usize = 8;

static EMOJI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?:
            # flag: a pair of regional indicators
            [\x{1F1E6}-\x{1F1FF}]{2}
            # keycap
          | [0-9\#*]\x{FE0F}?\x{20E3}
            # pictograph, optional skin tone, optional ZWJ chain
          | (?:\p{Emoji_Presentation}|\p{Extended_Pictographic}\x{FE0F})
            \p{Emoji_Modifier}?\x{FE0F}?
            (?:
              \x{200D}
              (?:\p{Emoji_Presentation}|\p{Extended_Pictographic})
              \p{Emoji_Modifier}?\x{FE0F}?
            )*
        )$",
    )
    .expect("valid emoji pattern")
});

/// True when `value` is exactly one emoji grapheme cluster of at most
/// [`MAX_EMOJI_UTF16_UNITS`] UTF-16 code units.
pub fn is_emoji(value: &str) -> bool {
    if value.is_empty() || value.encode_utf16().count() > MAX_EMOJI_UTF16_UNITS {
        return false;
    }
    if value.graphemes(true).count() != 1 {
        return false;
    }
    EMOJI_SEQUENCE.is_match(value)
}
