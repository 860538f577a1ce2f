//! Source icon resolution chain against recording collaborators

mod common;

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use common::{FakeLogoResolver, FakeReader, LogoResponse};
use workspace_icons::icons::{IconKey, IconResolver, LogoUrlKey, ResolvedIcon};
use workspace_icons::sources::{SourceConfig, SourceType};

fn resolver_with(reader: Arc<FakeReader>, logos: Arc<FakeLogoResolver>) -> IconResolver {
    IconResolver::builder(reader, logos).build()
}

fn linear() -> SourceConfig {
    SourceConfig::new("linear", SourceType::Mcp).with_mcp_url("https://api.linear.app")
}

#[tokio::test]
async fn test_linear_falls_through_to_favicon() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Found(
        "https://linear.app/favicon.ico".to_string(),
    )));
    let resolver = resolver_with(reader.clone(), logos.clone());

    let icon = resolver.resolve_source_icon("ws", &linear()).await;

    assert_eq!(
        icon,
        Some(ResolvedIcon::Url("https://linear.app/favicon.ico".to_string()))
    );
    assert_eq!(
        reader.calls(),
        vec![
            ("ws".to_string(), "sources/linear/icon.svg".to_string()),
            ("ws".to_string(), "sources/linear/icon.png".to_string()),
        ]
    );
    assert_eq!(
        logos.calls(),
        vec![("https://api.linear.app".to_string(), "linear".to_string())]
    );
    assert_eq!(resolver.get_source_icon_sync("ws", "linear"), icon);
}

#[tokio::test]
async fn test_linear_without_logo_returns_none() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
    let resolver = resolver_with(reader, logos);

    assert_eq!(resolver.resolve_source_icon("ws", &linear()).await, None);
    assert_eq!(resolver.get_source_icon_sync("ws", "linear"), None);
    assert_eq!(
        resolver
            .cache()
            .logo_url(&LogoUrlKey::new("https://api.linear.app", "linear")),
        Some(None)
    );
}

#[tokio::test]
async fn test_emoji_source_does_no_io() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
    let resolver = resolver_with(reader.clone(), logos.clone());
    let config = SourceConfig::new("x", SourceType::Unknown).with_icon("🔥");

    let icon = resolver.resolve_source_icon("ws", &config).await.unwrap();

    assert_eq!(icon.to_marker_string(), "emoji:🔥");
    assert_eq!(reader.call_count(), 0);
    assert_eq!(logos.call_count(), 0);
}

#[tokio::test]
async fn test_padded_emoji_resolves_to_trimmed_marker() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
    let resolver = resolver_with(reader.clone(), logos);
    let config = SourceConfig::new("x", SourceType::Unknown).with_icon(" 🔥 ");

    let icon = resolver.resolve_source_icon("ws", &config).await.unwrap();

    assert_eq!(icon.to_marker_string(), "emoji:🔥");
    assert_eq!(reader.call_count(), 0);
}

#[tokio::test]
async fn test_second_resolution_is_identical_and_free() {
    let reader = Arc::new(FakeReader::new().with_file(
        "ws",
        "sources/github/icon.svg",
        r#"<svg viewBox="0 0 16 16"><path fill="currentColor"/></svg>"#,
    ));
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
    let resolver = resolver_with(reader.clone(), logos.clone());
    let config = SourceConfig::new("github", SourceType::Mcp).with_mcp_url("https://api.github.com");

    let first = resolver.resolve_source_icon("ws", &config).await;
    let calls_after_first = reader.call_count();
    let second = resolver.resolve_source_icon("ws", &config).await;

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(calls_after_first, 1);
    assert_eq!(reader.call_count(), calls_after_first);
    assert_eq!(logos.call_count(), 0);
}

#[tokio::test]
async fn test_negative_logo_cache_skips_network() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
    let resolver = resolver_with(reader.clone(), logos.clone());

    assert_eq!(resolver.resolve_source_icon("ws", &linear()).await, None);
    assert_eq!(resolver.resolve_source_icon("ws", &linear()).await, None);

    // local tiers are retried, the network is not
    assert_eq!(reader.call_count(), 4);
    assert_eq!(logos.call_count(), 1);
}

#[tokio::test]
async fn test_transport_error_is_cached_as_none() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::TransportError));
    let resolver = resolver_with(reader, logos.clone());

    assert_eq!(resolver.resolve_source_icon("ws", &linear()).await, None);
    assert_eq!(resolver.resolve_source_icon("ws", &linear()).await, None);
    assert_eq!(logos.call_count(), 1);
}

#[tokio::test]
async fn test_logo_lookup_shared_across_workspaces() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Found(
        "https://linear.app/favicon.ico".to_string(),
    )));
    let resolver = resolver_with(reader, logos.clone());

    let a = resolver.resolve_source_icon("ws-a", &linear()).await;
    let b = resolver.resolve_source_icon("ws-b", &linear()).await;

    assert_eq!(a, b);
    assert_eq!(logos.call_count(), 1);
    assert!(resolver.get_source_icon_sync("ws-b", "linear").is_some());
}

#[tokio::test]
async fn test_clear_scopes() {
    let reader = Arc::new(FakeReader::new());
    let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Found(
        "https://linear.app/favicon.ico".to_string(),
    )));
    let resolver = resolver_with(reader, logos.clone());

    resolver.resolve_source_icon("ws", &linear()).await;
    resolver
        .cache()
        .insert(IconKey::skill("ws", "pdf"), ResolvedIcon::Emoji("📄".to_string()));

    resolver.clear_skill_icon_caches();
    assert!(resolver.get_source_icon_sync("ws", "linear").is_some());
    assert!(resolver.get_skill_icon_sync("ws", "pdf").is_none());

    resolver.clear_source_icon_caches();
    assert!(resolver.get_source_icon_sync("ws", "linear").is_none());

    // the logo store survives scoped clears
    resolver.resolve_source_icon("ws", &linear()).await;
    assert_eq!(logos.call_count(), 1);

    resolver.clear_icon_caches();
    resolver.resolve_source_icon("ws", &linear()).await;
    assert_eq!(logos.call_count(), 2);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_resolution() {
    let reader = Arc::new(FakeReader::new().with_delay(Duration::from_millis(10)));
    let logos = Arc::new(
        FakeLogoResolver::new(LogoResponse::Found("https://linear.app/favicon.ico".to_string()))
            .with_delay(Duration::from_millis(30)),
    );
    let resolver = resolver_with(reader.clone(), logos.clone());
    let config = linear();

    let (a, b) = tokio::join!(
        resolver.resolve_source_icon("ws", &config),
        resolver.resolve_source_icon("ws", &config)
    );

    assert_eq!(a, b);
    assert!(a.is_some());
    assert_eq!(reader.call_count(), 2);
    assert_eq!(logos.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_without_dedupe_run_twice() {
    let reader = Arc::new(FakeReader::new().with_delay(Duration::from_millis(10)));
    let logos = Arc::new(
        FakeLogoResolver::new(LogoResponse::Found("https://linear.app/favicon.ico".to_string()))
            .with_delay(Duration::from_millis(30)),
    );
    let resolver = IconResolver::builder(reader.clone(), logos.clone())
        .dedupe_in_flight(false)
        .build();
    let config = linear();

    let (a, b) = tokio::join!(
        resolver.resolve_source_icon("ws", &config),
        resolver.resolve_source_icon("ws", &config)
    );

    assert_eq!(a, b);
    assert_eq!(reader.call_count(), 4);
    assert_eq!(logos.call_count(), 2);
    assert_eq!(resolver.cache().len(), 1);
}

const EMOJIS: &[&str] = &["🔥", "🚀", "✅", "❤️", "👍🏽", "👩‍💻", "🇫🇷", "🏳️‍🌈", "#️⃣"];

proptest! {
    #[test]
    fn prop_emoji_icons_resolve_to_marker(index in 0..EMOJIS.len()) {
        let emoji = EMOJIS[index];
        let reader = Arc::new(FakeReader::new());
        let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
        let resolver = resolver_with(reader.clone(), logos);
        let config = SourceConfig::new("x", SourceType::Local).with_icon(emoji);

        let icon = tokio_test::block_on(resolver.resolve_source_icon("ws", &config));
        let marker = icon.map(|icon| icon.to_marker_string()).unwrap_or_default();

        prop_assert!(marker.starts_with("emoji:"));
        prop_assert!(marker.ends_with(emoji));
        prop_assert_eq!(reader.call_count(), 0);
    }

    #[test]
    fn prop_short_text_never_takes_emoji_branch(icon in "[a-zA-Z0-9 ./:_#*-]{1,8}") {
        let reader = Arc::new(FakeReader::new());
        let logos = Arc::new(FakeLogoResolver::new(LogoResponse::Missing));
        let resolver = resolver_with(reader.clone(), logos);
        let config = SourceConfig::new("x", SourceType::Local).with_icon(&icon);

        let resolved = tokio_test::block_on(resolver.resolve_source_icon("ws", &config));

        prop_assert_eq!(resolved, None);
        prop_assert!(reader.call_count() >= 2);
    }
}
