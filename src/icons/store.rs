//! In-memory icon stores

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

use super::key::{IconKey, IconKind, LogoUrlKey};
use super::value::ResolvedIcon;

/// Icon cache owned by whoever constructs it; there is no process-wide instance.
///
/// The primary store only ever holds successful resolutions. The logo-URL store
/// also records negative results, so `logo_url` distinguishes "never asked"
/// (`None`) from "asked, nothing found" (`Some(None)`).
#[derive(Debug, Default)]
pub struct IconCache {
    icons: RwLock<HashMap<IconKey, ResolvedIcon>>,
    logo_urls: RwLock<HashMap<LogoUrlKey, Option<String>>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &IconKey) -> Option<ResolvedIcon> {
        self.icons.read().get(key).cloned()
    }

    /// Store a resolution. The first value written for a key is kept; the
    /// value that is now cached is returned.
    pub fn insert(&self, key: IconKey, icon: ResolvedIcon) -> ResolvedIcon {
        let mut icons = self.icons.write();
        icons.entry(key).or_insert(icon).clone()
    }

    pub fn contains(&self, key: &IconKey) -> bool {
        self.icons.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.icons.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.read().is_empty()
    }

    pub fn logo_url(&self, key: &LogoUrlKey) -> Option<Option<String>> {
        self.logo_urls.read().get(key).cloned()
    }

    pub fn insert_logo_url(&self, key: LogoUrlKey, url: Option<String>) -> Option<String> {
        let mut logo_urls = self.logo_urls.write();
        logo_urls.entry(key).or_insert(url).clone()
    }

    pub fn logo_url_count(&self) -> usize {
        self.logo_urls.read().len()
    }

    /// Empty both stores.
    pub fn clear_all(&self) {
        let icons = {
            let mut icons = self.icons.write();
            let count = icons.len();
            icons.clear();
            count
        };
        let logo_urls = {
            let mut logo_urls = self.logo_urls.write();
            let count = logo_urls.len();
            logo_urls.clear();
            count
        };
        info!(
            "Cleared icon caches: {} icons, {} logo urls",
            icons, logo_urls
        );
    }

    /// Drop every icon of one kind. The logo-URL store is untouched.
    pub fn clear_kind(&self, kind: IconKind) -> usize {
        let mut icons = self.icons.write();
        let before = icons.len();
        icons.retain(|key, _| key.kind != kind);
        let removed = before - icons.len();
        debug!("Cleared {} {} icons", removed, kind);
        removed
    }
}
