//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::models::Banner;

/// Distance used in place of a deadline that would overflow the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `now + ttl`, saturating to a point decades ahead instead of overflowing.
pub(crate) fn deadline_after(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE)
}

// == Cache Entry ==
/// A cached banner snapshot and the instant it stops being servable.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached banner, shared with readers
    pub banner: Arc<Banner>,
    /// Expiration instant
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(banner: Arc<Banner>, ttl: Duration) -> Self {
        Self {
            banner,
            expires_at: deadline_after(Instant::now(), ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry read exactly at its expiration instant is still valid; it
    /// expires once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}
