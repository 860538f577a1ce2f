//! Icon resolution chain for sources, skills and statuses
//!
//! Sources walk the full chain:
//!
//! 1. primary cache
//! 2. emoji literal (no I/O)
//! 3. explicit local file (`./name` in the config)
//! 4. auto-discovered `icon.svg` / `icon.png`
//! 5. remote favicon, memoized per `(service_url, provider)` including misses
//!
//! Skills and statuses only use the local tiers. Resolution never fails; every
//! collaborator error degrades to "no icon".

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::emoji::is_emoji;
use super::key::{IconKey, IconKind, LogoUrlKey};
use super::store::IconCache;
use super::value::ResolvedIcon;
use crate::collaborators::{LogoUrlResolver, WorkspaceImageReader};
use crate::config::Config;
use crate::skills::{SkillConfig, SkillIconLocation};
use crate::sources::{IconSpec, SOURCE_ICON_CANDIDATES, SourceConfig};
use crate::statuses::StatusDefinition;
use crate::svg::{SvgThemer, is_svg_markup};

type SharedResolution = Shared<BoxFuture<'static, Option<ResolvedIcon>>>;

/// Only callers awaiting a resolution keep it alive; once they are all gone the
/// future is dropped and the stale entry is replaced on the next call.
type InFlight = WeakShared<BoxFuture<'static, Option<ResolvedIcon>>>;

struct ResolverInner {
    cache: Arc<IconCache>,
    reader: Arc<dyn WorkspaceImageReader>,
    logo_resolver: Arc<dyn LogoUrlResolver>,
    themer: SvgThemer,
    dedupe_in_flight: bool,
    in_flight: Mutex<HashMap<IconKey, InFlight>>,
}

/// Resolves icons through the collaborators and memoizes the results in an
/// [`IconCache`]. Cheap to clone; clones share the cache and in-flight map.
#[derive(Clone)]
pub struct IconResolver {
    inner: Arc<ResolverInner>,
}

impl std::fmt::Debug for IconResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconResolver")
            .field("cached_icons", &self.inner.cache.len())
            .field("dedupe_in_flight", &self.inner.dedupe_in_flight)
            .finish_non_exhaustive()
    }
}

impl IconResolver {
    pub fn builder(
        reader: Arc<dyn WorkspaceImageReader>,
        logo_resolver: Arc<dyn LogoUrlResolver>,
    ) -> IconResolverBuilder {
        IconResolverBuilder {
            reader,
            logo_resolver,
            cache: None,
            themer: None,
            dedupe_in_flight: crate::config::defaults::DEFAULT_DEDUPE_IN_FLIGHT,
        }
    }

    pub fn cache(&self) -> &Arc<IconCache> {
        &self.inner.cache
    }

    pub fn themer(&self) -> &SvgThemer {
        &self.inner.themer
    }

    pub fn reader(&self) -> &Arc<dyn WorkspaceImageReader> {
        &self.inner.reader
    }

    pub async fn resolve_source_icon(
        &self,
        workspace_id: &str,
        config: &SourceConfig,
    ) -> Option<ResolvedIcon> {
        let key = IconKey::source(workspace_id, &config.slug);
        if let Some(icon) = self.inner.cache.get(&key) {
            trace!("Icon cache hit: {}", key);
            return Some(icon);
        }

        let inner = Arc::clone(&self.inner);
        let workspace_id = workspace_id.to_string();
        let config = config.clone();
        self.run_once(key, async move {
            inner.resolve_source_uncached(&workspace_id, &config).await
        })
        .await
    }

    pub async fn resolve_skill_icon(
        &self,
        workspace_id: &str,
        skill: &SkillConfig,
    ) -> Option<ResolvedIcon> {
        let key = IconKey::skill(workspace_id, &skill.slug);
        if let Some(icon) = self.inner.cache.get(&key) {
            trace!("Icon cache hit: {}", key);
            return Some(icon);
        }

        let inner = Arc::clone(&self.inner);
        let workspace_id = workspace_id.to_string();
        let skill = skill.clone();
        self.run_once(key, async move {
            inner.resolve_skill_uncached(&workspace_id, &skill).await
        })
        .await
    }

    pub async fn resolve_status_icon(
        &self,
        workspace_id: &str,
        status: &StatusDefinition,
    ) -> Option<ResolvedIcon> {
        let key = IconKey::status(workspace_id, &status.id);
        if let Some(icon) = self.inner.cache.get(&key) {
            trace!("Icon cache hit: {}", key);
            return Some(icon);
        }

        let inner = Arc::clone(&self.inner);
        let workspace_id = workspace_id.to_string();
        let status = status.clone();
        self.run_once(key, async move {
            inner.resolve_status_uncached(&workspace_id, &status).await
        })
        .await
    }

    pub fn get_source_icon_sync(&self, workspace_id: &str, slug: &str) -> Option<ResolvedIcon> {
        self.inner.cache.get(&IconKey::source(workspace_id, slug))
    }

    pub fn get_skill_icon_sync(&self, workspace_id: &str, slug: &str) -> Option<ResolvedIcon> {
        self.inner.cache.get(&IconKey::skill(workspace_id, slug))
    }

    pub fn get_status_icon_sync(&self, workspace_id: &str, status_id: &str) -> Option<ResolvedIcon> {
        self.inner.cache.get(&IconKey::status(workspace_id, status_id))
    }

    /// Empty the icon store and the logo-URL store.
    pub fn clear_icon_caches(&self) {
        self.inner.cache.clear_all();
    }

    pub fn clear_source_icon_caches(&self) -> usize {
        self.inner.cache.clear_kind(IconKind::Source)
    }

    pub fn clear_skill_icon_caches(&self) -> usize {
        self.inner.cache.clear_kind(IconKind::Skill)
    }

    pub fn clear_status_icon_caches(&self) -> usize {
        self.inner.cache.clear_kind(IconKind::Status)
    }

    /// Run `resolution` for `key`, sharing it with concurrent callers for the
    /// same key when de-duplication is enabled.
    async fn run_once<F>(&self, key: IconKey, resolution: F) -> Option<ResolvedIcon>
    where
        F: Future<Output = Option<ResolvedIcon>> + Send + 'static,
    {
        if !self.inner.dedupe_in_flight {
            return resolution.await;
        }

        let shared: SharedResolution = {
            let mut in_flight = self.inner.in_flight.lock();
            match in_flight.get(&key).and_then(WeakShared::upgrade) {
                Some(existing) => {
                    trace!("Joining in-flight resolution: {}", key);
                    existing
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let done_key = key.clone();
                    let shared = async move {
                        let icon = resolution.await;
                        inner.in_flight.lock().remove(&done_key);
                        icon
                    }
                    .boxed()
                    .shared();
                    if let Some(weak) = shared.downgrade() {
                        in_flight.insert(key, weak);
                    }
                    shared
                }
            }
        };

        shared.await
    }
}

impl ResolverInner {
    async fn resolve_source_uncached(
        &self,
        workspace_id: &str,
        config: &SourceConfig,
    ) -> Option<ResolvedIcon> {
        let key = IconKey::source(workspace_id, &config.slug);

        match &config.icon {
            Some(IconSpec::Emoji(emoji)) => {
                debug!("Resolved {} to emoji {}", key, emoji);
                return Some(self.cache.insert(key, ResolvedIcon::Emoji(emoji.clone())));
            }
            Some(IconSpec::LocalPath(file_name)) => {
                let path = format!("sources/{}/{}", config.slug, file_name);
                if let Some(icon) = self.load_local(workspace_id, &path).await {
                    debug!("Resolved {} from configured file {}", key, path);
                    return Some(self.cache.insert(key, icon));
                }
            }
            _ => {}
        }

        for candidate in SOURCE_ICON_CANDIDATES {
            let path = format!("sources/{}/{}", config.slug, candidate);
            if let Some(icon) = self.load_local(workspace_id, &path).await {
                debug!("Resolved {} from discovered file {}", key, path);
                return Some(self.cache.insert(key, icon));
            }
        }

        let Some(service_url) = config.service_url() else {
            trace!("No local icon and no service URL for {}", key);
            return None;
        };

        let provider = config.provider_or_slug();
        let logo_key = LogoUrlKey::new(service_url, provider);
        let logo_url = match self.cache.logo_url(&logo_key) {
            Some(stored) => {
                trace!("Logo URL cache hit: {} -> {:?}", logo_key, stored);
                stored
            }
            None => {
                let fetched = match self
                    .logo_resolver
                    .get_logo_url(service_url, provider)
                    .await
                {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Favicon lookup failed for {}: {}", service_url, e);
                        None
                    }
                };
                self.cache.insert_logo_url(logo_key, fetched)
            }
        };

        let url = logo_url?;
        debug!("Resolved {} to favicon {}", key, url);
        Some(self.cache.insert(key, ResolvedIcon::Url(url)))
    }

    async fn resolve_skill_uncached(
        &self,
        workspace_id: &str,
        skill: &SkillConfig,
    ) -> Option<ResolvedIcon> {
        let icon_path = skill.icon_path.as_deref()?;
        let Some(location) = SkillIconLocation::parse(icon_path) else {
            trace!("Skill icon path does not match skills layout: {}", icon_path);
            return None;
        };

        let key = IconKey::skill(workspace_id, &skill.slug);
        let icon = self
            .load_local(workspace_id, &location.workspace_path())
            .await?;
        debug!("Resolved {} from {}", key, location.workspace_path());
        Some(self.cache.insert(key, icon))
    }

    async fn resolve_status_uncached(
        &self,
        workspace_id: &str,
        status: &StatusDefinition,
    ) -> Option<ResolvedIcon> {
        let key = IconKey::status(workspace_id, &status.id);

        if let Some(emoji) = status.icon.as_deref().map(str::trim).filter(|i| is_emoji(i)) {
            debug!("Resolved {} to emoji {}", key, emoji);
            return Some(self.cache.insert(key, ResolvedIcon::Emoji(emoji.to_string())));
        }

        for path in status.icon_candidates() {
            if let Some(icon) = self.load_local(workspace_id, &path).await {
                debug!("Resolved {} from discovered file {}", key, path);
                return Some(self.cache.insert(key, icon));
            }
        }

        None
    }

    /// Read a workspace file; SVG markup is themed into a data URL whatever the
    /// file is called, anything else is passed through as the reader returned it.
    async fn load_local(&self, workspace_id: &str, path: &str) -> Option<ResolvedIcon> {
        match self.reader.read_workspace_image(workspace_id, path).await {
            Ok(content) if is_svg_markup(&content) => Some(ResolvedIcon::Url(
                self.themer.svg_to_themed_data_url(&content, None),
            )),
            Ok(content) => Some(ResolvedIcon::Url(content)),
            Err(e) => {
                if !e.is_not_found() {
                    debug!("Could not read {}/{}: {}", workspace_id, path, e);
                }
                None
            }
        }
    }
}

pub struct IconResolverBuilder {
    reader: Arc<dyn WorkspaceImageReader>,
    logo_resolver: Arc<dyn LogoUrlResolver>,
    cache: Option<Arc<IconCache>>,
    themer: Option<SvgThemer>,
    dedupe_in_flight: bool,
}

impl IconResolverBuilder {
    /// Share an existing cache instead of creating a fresh one.
    pub fn cache(mut self, cache: Arc<IconCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn themer(mut self, themer: SvgThemer) -> Self {
        self.themer = Some(themer);
        self
    }

    pub fn dedupe_in_flight(mut self, enabled: bool) -> Self {
        self.dedupe_in_flight = enabled;
        self
    }

    /// Apply the `[icons]` settings from the application config.
    pub fn config(self, config: &Config) -> Self {
        self.dedupe_in_flight(config.icons.dedupe_in_flight)
    }

    pub fn build(self) -> IconResolver {
        IconResolver {
            inner: Arc::new(ResolverInner {
                cache: self.cache.unwrap_or_default(),
                reader: self.reader,
                logo_resolver: self.logo_resolver,
                themer: self.themer.unwrap_or_default(),
                dedupe_in_flight: self.dedupe_in_flight,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockLogoUrlResolver, MockWorkspaceImageReader};
    use crate::errors::CollaboratorError;
    use crate::sources::SourceType;
    use crate::statuses::StatusConfig;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use tracing_test::traced_test;

    fn not_found(workspace_id: &str, path: &str) -> CollaboratorError {
        CollaboratorError::NotFound {
            workspace_id: workspace_id.to_string(),
            path: path.to_string(),
        }
    }

    fn resolver(reader: MockWorkspaceImageReader, logos: MockLogoUrlResolver) -> IconResolver {
        IconResolver::builder(Arc::new(reader), Arc::new(logos)).build()
    }

    fn decode_svg(icon: &ResolvedIcon) -> String {
        let encoded = icon
            .value()
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("svg data url");
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_emoji_needs_no_io() {
        let resolver = resolver(MockWorkspaceImageReader::new(), MockLogoUrlResolver::new());
        let config = SourceConfig::new("x", SourceType::Mcp)
            .with_mcp_url("https://mcp.example.com")
            .with_icon("🔥");

        let icon = resolver.resolve_source_icon("ws", &config).await.unwrap();
        assert_eq!(icon.to_marker_string(), "emoji:🔥");
        assert_eq!(resolver.get_source_icon_sync("ws", "x"), Some(icon));
    }

    #[tokio::test]
    async fn test_explicit_svg_is_themed() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("sources/linear/logo.svg"))
            .times(1)
            .returning(|_, _| Ok(r#"<svg><path fill="currentColor"/></svg>"#.to_string()));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let config = SourceConfig::new("linear", SourceType::Local).with_icon("./logo.svg");

        let icon = resolver.resolve_source_icon("ws", &config).await.unwrap();
        assert_eq!(
            decode_svg(&icon),
            r##"<svg fill="#3b3b3b"><path fill="#3b3b3b"/></svg>"##
        );
    }

    #[tokio::test]
    async fn test_explicit_failure_falls_through_to_discovery() {
        let mut seq = Sequence::new();
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("sources/db/missing.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|ws, path| Err(not_found(ws, path)));
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("sources/db/icon.svg"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|ws, path| Err(not_found(ws, path)));
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("sources/db/icon.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("data:image/png;base64,AAAA".to_string()));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let config = SourceConfig::new("db", SourceType::Local).with_icon("./missing.png");

        let icon = resolver.resolve_source_icon("ws", &config).await;
        assert_eq!(
            icon,
            Some(ResolvedIcon::Url("data:image/png;base64,AAAA".to_string()))
        );
    }

    #[tokio::test]
    async fn test_remote_icon_string_uses_discovery() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("sources/cdn/icon.svg"))
            .times(1)
            .returning(|_, _| Ok("<svg/>".to_string()));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let config =
            SourceConfig::new("cdn", SourceType::Local).with_icon("https://cdn.example.com/a.png");

        let icon = resolver.resolve_source_icon("ws", &config).await.unwrap();
        assert_eq!(decode_svg(&icon), r##"<svg fill="#3b3b3b"/>"##);
    }

    #[tokio::test]
    async fn test_non_remote_types_stop_after_discovery() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .times(2)
            .returning(|ws, path| Err(not_found(ws, path)));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let config = SourceConfig::new("files", SourceType::Local);

        assert_eq!(resolver.resolve_source_icon("ws", &config).await, None);
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_favicon_miss_is_negatively_cached() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .returning(|ws, path| Err(not_found(ws, path)));

        let mut logos = MockLogoUrlResolver::new();
        logos
            .expect_get_logo_url()
            .with(eq("https://api.linear.app"), eq("linear"))
            .times(1)
            .returning(|_, _| Ok(None));

        let resolver = resolver(reader, logos);
        let config =
            SourceConfig::new("linear", SourceType::Mcp).with_mcp_url("https://api.linear.app");

        assert_eq!(resolver.resolve_source_icon("ws", &config).await, None);
        assert_eq!(resolver.resolve_source_icon("ws", &config).await, None);
        assert_eq!(
            resolver
                .cache()
                .logo_url(&LogoUrlKey::new("https://api.linear.app", "linear")),
            Some(None)
        );
    }

    #[tokio::test]
    async fn test_favicon_hit_populates_both_stores() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .times(2)
            .returning(|ws, path| Err(not_found(ws, path)));

        let mut logos = MockLogoUrlResolver::new();
        logos
            .expect_get_logo_url()
            .with(eq("https://api.stripe.com"), eq("stripe"))
            .times(1)
            .returning(|_, _| Ok(Some("https://stripe.com/favicon.ico".to_string())));

        let resolver = resolver(reader, logos);
        let config = SourceConfig::new("payments", SourceType::Api)
            .with_api_base_url("https://api.stripe.com")
            .with_provider("stripe");

        let first = resolver.resolve_source_icon("ws", &config).await;
        let second = resolver.resolve_source_icon("ws", &config).await;
        assert_eq!(first, second);
        assert_eq!(
            resolver.get_source_icon_sync("ws", "payments"),
            Some(ResolvedIcon::Url("https://stripe.com/favicon.ico".to_string()))
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_favicon_error_is_logged_and_cached_as_none() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .returning(|ws, path| Err(not_found(ws, path)));

        let mut logos = MockLogoUrlResolver::new();
        logos
            .expect_get_logo_url()
            .times(1)
            .returning(|url, _| Err(CollaboratorError::transport(url, "connection reset")));

        let resolver = resolver(reader, logos);
        let config =
            SourceConfig::new("linear", SourceType::Mcp).with_mcp_url("https://api.linear.app");

        assert_eq!(resolver.resolve_source_icon("ws", &config).await, None);
        assert_eq!(resolver.resolve_source_icon("ws", &config).await, None);
        assert!(logs_contain("Favicon lookup failed"));
    }

    #[tokio::test]
    async fn test_skill_path_mismatch_reads_nothing() {
        let resolver = resolver(MockWorkspaceImageReader::new(), MockLogoUrlResolver::new());
        let skill = SkillConfig::new("pdf", "/somewhere/else/icon.svg");

        assert_eq!(resolver.resolve_skill_icon("ws", &skill).await, None);
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_skill_failure_is_not_cached() {
        let mut seq = Sequence::new();
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("skills/pdf/assets/icon.svg"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|ws, path| Err(not_found(ws, path)));
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("skills/pdf/assets/icon.svg"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("<svg/>".to_string()));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let skill = SkillConfig::new("pdf", "/home/me/ws/skills/pdf/assets/icon.svg");

        assert_eq!(resolver.resolve_skill_icon("ws", &skill).await, None);
        let icon = resolver.resolve_skill_icon("ws", &skill).await.unwrap();
        assert_eq!(resolver.get_skill_icon_sync("ws", "pdf"), Some(icon));
    }

    #[tokio::test]
    async fn test_status_discovery_order() {
        let mut seq = Sequence::new();
        let mut reader = MockWorkspaceImageReader::new();
        for ext in ["svg", "png"] {
            let path = format!("statuses/icons/done.{ext}");
            reader
                .expect_read_workspace_image()
                .with(eq("ws"), eq(path))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|ws, path| Err(not_found(ws, path)));
        }
        reader
            .expect_read_workspace_image()
            .with(eq("ws"), eq("statuses/icons/done.jpg"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("data:image/jpeg;base64,AAAA".to_string()));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let statuses = StatusConfig::default();
        let done = statuses.get("done").unwrap();

        let icon = resolver.resolve_status_icon("ws", done).await;
        assert_eq!(
            icon,
            Some(ResolvedIcon::Url("data:image/jpeg;base64,AAAA".to_string()))
        );
    }

    #[tokio::test]
    async fn test_status_emoji_and_miss() {
        let mut reader = MockWorkspaceImageReader::new();
        reader
            .expect_read_workspace_image()
            .times(4)
            .returning(|ws, path| Err(not_found(ws, path)));

        let resolver = resolver(reader, MockLogoUrlResolver::new());
        let mut statuses = StatusConfig::default();
        statuses.statuses[0].icon = Some("🧊".to_string());

        let backlog = resolver.resolve_status_icon("ws", &statuses.statuses[0]).await;
        assert_eq!(backlog, Some(ResolvedIcon::Emoji("🧊".to_string())));

        let todo = statuses.get("todo").unwrap();
        assert_eq!(resolver.resolve_status_icon("ws", todo).await, None);
        assert_eq!(resolver.get_status_icon_sync("ws", "todo"), None);
    }

    struct SlowReader;

    #[async_trait::async_trait]
    impl WorkspaceImageReader for SlowReader {
        async fn read_workspace_image(
            &self,
            _workspace_id: &str,
            _relative_path: &str,
        ) -> crate::errors::CollaboratorResult<String> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok("<svg/>".to_string())
        }
    }

    #[tokio::test]
    async fn test_cancelled_resolution_is_released() {
        let resolver =
            IconResolver::builder(Arc::new(SlowReader), Arc::new(MockLogoUrlResolver::new()))
                .build();
        let config = SourceConfig::new("db", SourceType::Local);

        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(5),
            resolver.resolve_source_icon("ws", &config),
        )
        .await;
        assert!(cancelled.is_err());

        // the abandoned future no longer holds the resolver
        assert_eq!(Arc::strong_count(&resolver.inner), 1);

        let icon = resolver.resolve_source_icon("ws", &config).await;
        assert!(icon.is_some());
        assert!(resolver.inner.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn test_scoped_clears() {
        let resolver = resolver(MockWorkspaceImageReader::new(), MockLogoUrlResolver::new());
        let cache = resolver.cache();
        cache.insert(IconKey::source("ws", "a"), ResolvedIcon::Emoji("🔥".into()));
        cache.insert(IconKey::skill("ws", "a"), ResolvedIcon::Emoji("🚀".into()));
        cache.insert(IconKey::status("ws", "a"), ResolvedIcon::Emoji("✅".into()));
        cache.insert_logo_url(LogoUrlKey::new("https://x", "x"), None);

        assert_eq!(resolver.clear_skill_icon_caches(), 1);
        assert!(resolver.get_source_icon_sync("ws", "a").is_some());
        assert_eq!(resolver.clear_status_icon_caches(), 1);
        assert_eq!(resolver.clear_source_icon_caches(), 1);
        assert_eq!(cache.logo_url_count(), 1);

        cache.insert(IconKey::source("ws", "a"), ResolvedIcon::Emoji("🔥".into()));
        resolver.clear_icon_caches();
        assert!(cache.is_empty());
        assert_eq!(cache.logo_url_count(), 0);
    }
}
