//! Banner Service
//!
//! Read path (cache in front of the store) and admin path (store only).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::with_deadline;
use crate::cache::{cache_key, BannerCache};
use crate::error::{BannerError, Result};
use crate::models::{Banner, BannerFilter, BannerPayload};
use crate::store::{BannerStore, RevisionOrder, StoreResult};

// == Banner Service ==
pub struct BannerService {
    store: Arc<dyn BannerStore>,
    cache: Arc<BannerCache>,
    store_timeout: Duration,
}

impl BannerService {
    pub fn new(store: Arc<dyn BannerStore>, cache: Arc<BannerCache>, store_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            store_timeout,
        }
    }

    /// The cache fronting user lookups.
    pub fn cache(&self) -> &Arc<BannerCache> {
        &self.cache
    }

    // == Read Path ==
    /// Resolves the banner a caller sees for `(tag_id, feature_id)`.
    ///
    /// With `use_last_revision` the most recently updated banner is read
    /// straight from the store and the cache is left untouched. Otherwise the
    /// cache is consulted first, falling back to the most recently created
    /// banner, and a visible result is written back (refreshing its TTL).
    /// Inactive banners are only shown to admins.
    pub async fn resolve_user_banner(
        &self,
        tag_id: i64,
        feature_id: i64,
        use_last_revision: bool,
        is_admin: bool,
    ) -> Result<Arc<Banner>> {
        let key = cache_key(tag_id, feature_id);

        let banner = if use_last_revision {
            self.fetch_latest(tag_id, feature_id, RevisionOrder::UpdatedAt)
                .await?
        } else {
            match self.cache.get(&key) {
                Some(cached) => {
                    debug!(%key, "banner cache hit");
                    Some(cached)
                }
                None => {
                    debug!(%key, "banner cache miss");
                    self.fetch_latest(tag_id, feature_id, RevisionOrder::CreatedAt)
                        .await?
                }
            }
        };

        let banner = match banner {
            Some(banner) if banner.is_visible_to(is_admin) => banner,
            _ => return Err(BannerError::NotAvailable),
        };

        if !use_last_revision {
            self.cache.set(key, Arc::clone(&banner));
        }
        Ok(banner)
    }

    async fn fetch_latest(
        &self,
        tag_id: i64,
        feature_id: i64,
        order: RevisionOrder,
    ) -> Result<Option<Arc<Banner>>> {
        let banner = self
            .with_deadline(
                "latest_by_filter",
                self.store.latest_by_filter(tag_id, feature_id, order),
            )
            .await?;
        Ok(banner.map(Arc::new))
    }

    // == Admin Path ==
    /// Lists banners matching `filter`. Never served from the cache.
    pub async fn list_banners(&self, filter: BannerFilter) -> Result<Vec<Banner>> {
        self.with_deadline("filtered", self.store.filtered(filter))
            .await
    }

    pub async fn create_banner(&self, payload: BannerPayload) -> Result<Banner> {
        validate(&payload)?;
        self.with_deadline("create", self.store.create(payload))
            .await
    }

    pub async fn update_banner(&self, id: i64, payload: BannerPayload) -> Result<Banner> {
        validate(&payload)?;
        self.with_deadline("update", self.store.update(id, payload))
            .await
    }

    pub async fn delete_banner(&self, id: i64) -> Result<()> {
        self.with_deadline("delete", self.store.delete(id)).await
    }

    async fn with_deadline<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        with_deadline(self.store_timeout, operation, call).await
    }
}

fn validate(payload: &BannerPayload) -> Result<()> {
    match payload.validate() {
        Some(message) => Err(BannerError::Validation(message)),
        None => Ok(()),
    }
}
