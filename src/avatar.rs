//! Headless avatar view-model
//!
//! Mirrors what the avatar component does on screen: paint immediately from the
//! synchronous cache getter, resolve asynchronously, and apply the result only
//! if the avatar still shows the same identity. Each retarget bumps a
//! generation counter; results carrying an older generation are dropped.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::icons::{IconKey, IconKind, IconResolver, ResolvedIcon};
use crate::skills::SkillConfig;
use crate::sources::SourceConfig;
use crate::statuses::{BULLET_GLYPH, StatusDefinition};

/// Type-specific placeholder shown when no icon resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackGlyph {
    Plug,
    Sparkle,
    Bullet,
}

impl FallbackGlyph {
    pub fn for_kind(kind: IconKind) -> Self {
        match kind {
            IconKind::Source => Self::Plug,
            IconKind::Skill => Self::Sparkle,
            IconKind::Status => Self::Bullet,
        }
    }

    /// Glyph name understood by the icon set; the bullet is a literal character
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plug => "plug",
            Self::Sparkle => "sparkle",
            Self::Bullet => BULLET_GLYPH,
        }
    }
}

impl fmt::Display for FallbackGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection indicator overlaid on source avatars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    NeedsAuth,
    Failed,
    Untested,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarRender {
    /// Render as text
    Emoji(String),
    /// Render as an image; report load errors through [`AvatarModel::image_failed`]
    Image(String),
    Glyph(FallbackGlyph),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarView {
    pub render: AvatarRender,
    pub connection: Option<ConnectionStatus>,
    pub loading: bool,
}

/// Issued by [`AvatarModel::set_target`]; hand it back to [`AvatarModel::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub key: IconKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    /// The avatar was retargeted while the resolution ran
    Stale,
}

#[derive(Debug)]
pub struct AvatarModel {
    kind: IconKind,
    target: Option<IconKey>,
    generation: u64,
    icon: Option<ResolvedIcon>,
    loading: bool,
    image_failed: bool,
    connection: Option<ConnectionStatus>,
}

impl AvatarModel {
    pub fn new(kind: IconKind) -> Self {
        Self {
            kind,
            target: None,
            generation: 0,
            icon: None,
            loading: false,
            image_failed: false,
            connection: None,
        }
    }

    pub fn kind(&self) -> IconKind {
        self.kind
    }

    pub fn target(&self) -> Option<&IconKey> {
        self.target.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Point the avatar at a new identity, painting `sync_value` right away.
    pub fn set_target(&mut self, key: IconKey, sync_value: Option<ResolvedIcon>) -> LoadTicket {
        self.generation += 1;
        self.loading = sync_value.is_none();
        self.icon = sync_value;
        self.image_failed = false;
        self.target = Some(key.clone());

        LoadTicket {
            generation: self.generation,
            key,
        }
    }

    /// Apply an asynchronous result if `ticket` is still current.
    ///
    /// A `None` result keeps whatever was painted synchronously.
    pub fn settle(&mut self, ticket: &LoadTicket, result: Option<ResolvedIcon>) -> SettleOutcome {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale avatar result for {} (generation {} < {})",
                ticket.key, ticket.generation, self.generation
            );
            return SettleOutcome::Stale;
        }

        if let Some(icon) = result {
            self.icon = Some(icon);
            self.image_failed = false;
        }
        self.loading = false;
        SettleOutcome::Applied
    }

    /// The renderer could not load the image; fall back to the glyph.
    pub fn image_failed(&mut self) {
        if matches!(self.icon, Some(ResolvedIcon::Url(_))) {
            self.image_failed = true;
        }
    }

    pub fn set_connection_status(&mut self, status: Option<ConnectionStatus>) {
        self.connection = status;
    }

    pub fn render(&self) -> AvatarView {
        let render = match &self.icon {
            Some(ResolvedIcon::Emoji(emoji)) => AvatarRender::Emoji(emoji.clone()),
            Some(ResolvedIcon::Url(url)) if !self.image_failed => AvatarRender::Image(url.clone()),
            _ => AvatarRender::Glyph(FallbackGlyph::for_kind(self.kind)),
        };

        AvatarView {
            render,
            connection: self.connection,
            loading: self.loading,
        }
    }
}

/// Drives shared [`AvatarModel`]s against an [`IconResolver`].
#[derive(Debug, Clone)]
pub struct AvatarLoader {
    resolver: IconResolver,
}

impl AvatarLoader {
    pub fn new(resolver: IconResolver) -> Self {
        Self { resolver }
    }

    pub async fn load_source(
        &self,
        model: &Mutex<AvatarModel>,
        workspace_id: &str,
        config: &SourceConfig,
    ) -> SettleOutcome {
        let ticket = model.lock().set_target(
            IconKey::source(workspace_id, &config.slug),
            self.resolver.get_source_icon_sync(workspace_id, &config.slug),
        );
        let result = self.resolver.resolve_source_icon(workspace_id, config).await;
        model.lock().settle(&ticket, result)
    }

    pub async fn load_skill(
        &self,
        model: &Mutex<AvatarModel>,
        workspace_id: &str,
        skill: &SkillConfig,
    ) -> SettleOutcome {
        let ticket = model.lock().set_target(
            IconKey::skill(workspace_id, &skill.slug),
            self.resolver.get_skill_icon_sync(workspace_id, &skill.slug),
        );
        let result = self.resolver.resolve_skill_icon(workspace_id, skill).await;
        model.lock().settle(&ticket, result)
    }

    pub async fn load_status(
        &self,
        model: &Mutex<AvatarModel>,
        workspace_id: &str,
        status: &StatusDefinition,
    ) -> SettleOutcome {
        let ticket = model.lock().set_target(
            IconKey::status(workspace_id, &status.id),
            self.resolver.get_status_icon_sync(workspace_id, &status.id),
        );
        let result = self.resolver.resolve_status_icon(workspace_id, status).await;
        model.lock().settle(&ticket, result)
    }
}
