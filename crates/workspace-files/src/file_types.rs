//! Content type detection for workspace images using magic number detection
//!
//! Raster formats are recognised by signature via the `infer` crate. SVG has no
//! magic number, so it is sniffed first by looking for an `<svg` root near the
//! start of the (UTF-8) text; `infer` would otherwise report an SVG carrying an
//! XML prolog as `text/xml`. File extensions are never consulted.

use crate::error::{Result, WorkspaceFileError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use infer::Infer;
use std::collections::HashSet;

/// MIME type reported for SVG documents.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Configuration for content type detection
#[derive(Debug, Clone)]
pub struct FileTypeConfig {
    /// Set of allowed MIME types (empty means allow all)
    pub allowed_mime_types: HashSet<String>,
    /// Maximum bytes inspected when sniffing for an SVG root
    pub max_detection_bytes: usize,
}

impl Default for FileTypeConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: HashSet::new(),
            max_detection_bytes: 8192,
        }
    }
}

impl FileTypeConfig {
    /// Configuration restricted to the image types workspace icons may use.
    #[must_use]
    pub fn images() -> Self {
        FileTypeConfigBuilder::new()
            .allow_mime_type(SVG_MIME_TYPE)
            .allow_mime_type("image/png")
            .allow_mime_type("image/jpeg")
            .allow_mime_type("image/gif")
            .allow_mime_type("image/webp")
            .allow_mime_type("image/vnd.microsoft.icon")
            .allow_mime_type("image/x-icon")
            .build()
    }
}

/// Content type detector using magic numbers plus an SVG text sniffer
pub struct FileTypeValidator {
    config: FileTypeConfig,
    infer: Infer,
}

impl FileTypeValidator {
    /// Create a new validator with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FileTypeConfig::default())
    }

    /// Create a new validator with custom configuration
    #[must_use]
    pub fn with_config(config: FileTypeConfig) -> Self {
        Self {
            config,
            infer: Infer::new(),
        }
    }

    /// Detect the content type of `content`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The detected MIME type is not allowed
    /// - The content cannot be classified (unknown signature)
    pub fn detect(&self, content: &[u8]) -> Result<FileTypeInfo> {
        let window = &content[..content.len().min(self.config.max_detection_bytes)];
        let (mime_type, extension) = if looks_like_svg(window) {
            (SVG_MIME_TYPE, "svg")
        } else {
            let Some(detected_type) = self.infer.get(window) else {
                return Err(WorkspaceFileError::UnsupportedContentType {
                    content_type: "unknown".to_string(),
                });
            };
            (detected_type.mime_type(), detected_type.extension())
        };

        if !self.is_mime_type_allowed(mime_type) {
            return Err(WorkspaceFileError::UnsupportedContentType {
                content_type: mime_type.to_string(),
            });
        }

        Ok(FileTypeInfo {
            mime_type: mime_type.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Check if a MIME type is allowed (empty set means allow all)
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.config.allowed_mime_types.is_empty()
            || self.config.allowed_mime_types.contains(mime_type)
    }
}

impl Default for FileTypeValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a detected file type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeInfo {
    /// MIME type of the file
    pub mime_type: String,
    /// Canonical extension for this type (informational only)
    pub extension: String,
}

impl FileTypeInfo {
    #[must_use]
    pub fn is_svg(&self) -> bool {
        self.mime_type == SVG_MIME_TYPE
    }

    /// Encode `content` as a `data:` URL carrying this MIME type.
    #[must_use]
    pub fn to_data_url(&self, content: &[u8]) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(content))
    }
}

/// Builder for creating custom file type configurations
pub struct FileTypeConfigBuilder {
    config: FileTypeConfig,
}

impl FileTypeConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FileTypeConfig::default(),
        }
    }

    /// Add a single allowed MIME type
    #[must_use]
    pub fn allow_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.config.allowed_mime_types.insert(mime_type.into());
        self
    }

    #[must_use]
    pub fn build(self) -> FileTypeConfig {
        self.config
    }
}

impl Default for FileTypeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// SVG sniffer: UTF-8 text whose first element (after an optional BOM, XML
/// prolog, comments or doctype) is `<svg`.
fn looks_like_svg(buf: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(buf).or_else(|e| {
        // A detection window can cut a multi-byte character in half.
        std::str::from_utf8(&buf[..e.valid_up_to()])
    }) else {
        return false;
    };

    let mut rest = text.trim_start_matches('\u{feff}').trim_start();
    loop {
        if rest.starts_with("<?") {
            match rest.find("?>") {
                Some(end) => rest = rest[end + 2..].trim_start(),
                None => return false,
            }
        } else if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => rest = rest[end + 3..].trim_start(),
                None => return false,
            }
        } else if rest.starts_with("<!") {
            match rest.find('>') {
                Some(end) => rest = rest[end + 1..].trim_start(),
                None => return false,
            }
        } else {
            break;
        }
    }

    rest.get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("<svg"))
}
