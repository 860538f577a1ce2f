//! Icon resolution with per-tier memoization
//!
//! This module provides the icon cache used by source, skill and status
//! avatars:
//!
//! - Typed keys partitioned by icon kind and workspace
//! - A tagged result type instead of prefix-encoded strings
//! - A negative cache for favicon lookups so known misses never hit the network
//! - Optional sharing of concurrent resolutions for the same key

pub mod emoji;
pub mod key;
pub mod resolver;
pub mod store;
pub mod value;

pub use emoji::is_emoji;
pub use key::{IconKey, IconKind, LogoUrlKey};
pub use resolver::{IconResolver, IconResolverBuilder};
pub use store::IconCache;
pub use value::{EMOJI_MARKER_PREFIX, ResolvedIcon};
