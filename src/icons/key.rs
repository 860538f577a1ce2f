//! Typed cache keys for the icon stores

use std::fmt;

/// Icon category; partitions the key space so categories never collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Source,
    Skill,
    Status,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Skill => "skill",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary icon store key: one entry per (kind, workspace, identifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub kind: IconKind,
    pub workspace: String,
    /// Source slug, skill slug or status id
    pub identifier: String,
}

impl IconKey {
    pub fn new(kind: IconKind, workspace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            workspace: workspace.into(),
            identifier: identifier.into(),
        }
    }

    pub fn source(workspace: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::new(IconKind::Source, workspace, slug)
    }

    pub fn skill(workspace: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::new(IconKind::Skill, workspace, slug)
    }

    pub fn status(workspace: impl Into<String>, status_id: impl Into<String>) -> Self {
        Self::new(IconKind::Status, workspace, status_id)
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.workspace, self.identifier)
    }
}

/// Logo-URL store key; `provider` falls back to the source slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogoUrlKey {
    pub service_url: String,
    pub provider: String,
}

impl LogoUrlKey {
    pub fn new(service_url: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            provider: provider.into(),
        }
    }
}

impl fmt::Display for LogoUrlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service_url, self.provider)
    }
}
