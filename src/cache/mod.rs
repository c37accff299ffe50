//! Cache Module
//!
//! In-memory banner cache with per-entry TTL expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub(crate) use entry::deadline_after;
pub use stats::{CacheCounters, CacheStats};
pub use store::BannerCache;

/// Builds the cache key for a `(tag, feature)` lookup.
pub fn cache_key(tag_id: i64, feature_id: i64) -> String {
    format!("{}-{}", tag_id, feature_id)
}
