//! In-memory banner store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{BannerStore, RevisionOrder, StoreError, StoreResult};
use crate::models::{Banner, BannerFilter, BannerPayload, Feature};

#[derive(Debug)]
struct State {
    banners: BTreeMap<i64, Banner>,
    next_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl State {
    /// Wall-clock time, nudged forward so every write gets a distinct,
    /// strictly increasing timestamp.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

/// Banner store kept entirely in process memory.
#[derive(Debug)]
pub struct MemoryBannerStore {
    state: RwLock<State>,
}

impl MemoryBannerStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                banners: BTreeMap::new(),
                next_id: 1,
                last_stamp: None,
            }),
        }
    }

    /// Number of stored banners.
    pub async fn len(&self) -> usize {
        self.state.read().await.banners.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.banners.is_empty()
    }
}

impl Default for MemoryBannerStore {
    fn default() -> Self {
        Self::new()
    }
}

fn required_feature(payload: &BannerPayload) -> StoreResult<Feature> {
    payload
        .feature
        .clone()
        .ok_or_else(|| StoreError::Backend("banner has no feature".to_string()))
}

#[async_trait]
impl BannerStore for MemoryBannerStore {
    async fn latest_by_filter(
        &self,
        tag_id: i64,
        feature_id: i64,
        order: RevisionOrder,
    ) -> StoreResult<Option<Banner>> {
        let state = self.state.read().await;
        let latest = state
            .banners
            .values()
            .filter(|b| b.feature.id == feature_id && b.has_tag(tag_id))
            .max_by_key(|b| match order {
                RevisionOrder::CreatedAt => (b.created_at, b.id),
                RevisionOrder::UpdatedAt => (b.updated_at, b.id),
            })
            .cloned();

        debug!(tag_id, feature_id, ?order, found = latest.is_some(), "latest banner lookup");
        Ok(latest)
    }

    async fn filtered(&self, filter: BannerFilter) -> StoreResult<Vec<Banner>> {
        let state = self.state.read().await;
        let matching = state
            .banners
            .values()
            .filter(|b| filter.feature_id.map_or(true, |id| b.feature.id == id))
            .filter(|b| filter.tag_id.map_or(true, |id| b.has_tag(id)))
            .skip(filter.offset);

        let banners = match filter.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        };
        Ok(banners)
    }

    async fn create(&self, payload: BannerPayload) -> StoreResult<Banner> {
        let feature = required_feature(&payload)?;
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;
        let now = state.next_stamp();

        let banner = Banner {
            id,
            title: payload.title,
            text: payload.text,
            url: payload.url,
            is_active: payload.is_active,
            feature,
            tags: payload.tags,
            created_at: now,
            updated_at: now,
        };
        state.banners.insert(id, banner.clone());

        debug!(id, "banner created");
        Ok(banner)
    }

    async fn update(&self, id: i64, payload: BannerPayload) -> StoreResult<Banner> {
        let feature = required_feature(&payload)?;
        let mut state = self.state.write().await;

        if !state.banners.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        let now = state.next_stamp();
        let Some(banner) = state.banners.get_mut(&id) else {
            return Err(StoreError::NotFound(id));
        };

        banner.title = payload.title;
        banner.text = payload.text;
        banner.url = payload.url;
        banner.is_active = payload.is_active;
        banner.feature = feature;
        banner.tags = payload.tags;
        banner.updated_at = now;

        debug!(id, "banner updated");
        Ok(banner.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if state.banners.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        debug!(id, "banner deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn payload(title: &str, feature_id: i64, tag_ids: &[i64], is_active: bool) -> BannerPayload {
        BannerPayload {
            title: title.to_string(),
            text: format!("{} text", title),
            url: "https://example.com".to_string(),
            is_active,
            feature: Some(Feature {
                id: feature_id,
                name: format!("Feature {}", feature_id),
            }),
            tags: tag_ids
                .iter()
                .map(|id| Tag {
                    id: *id,
                    name: format!("Tag {}", id),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_timestamps() {
        let store = MemoryBannerStore::new();

        let first = store.create(payload("a", 1, &[1], true)).await.unwrap();
        let second = store.create(payload("b", 1, &[1], true)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
        assert!(second.created_at > first.created_at);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_without_feature_fails() {
        let store = MemoryBannerStore::new();
        let mut body = payload("a", 1, &[1], true);
        body.feature = None;

        assert!(matches!(store.create(body).await, Err(StoreError::Backend(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_latest_by_filter_matches_feature_and_tag() {
        let store = MemoryBannerStore::new();
        store.create(payload("f1-t1", 1, &[1, 2], true)).await.unwrap();
        store.create(payload("f2-t1", 2, &[1], true)).await.unwrap();

        let found = store
            .latest_by_filter(2, 1, RevisionOrder::CreatedAt)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "f1-t1");

        let missing = store
            .latest_by_filter(3, 1, RevisionOrder::CreatedAt)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_created_and_updated_orders_diverge() {
        let store = MemoryBannerStore::new();
        let older = store.create(payload("older", 1, &[1], true)).await.unwrap();
        let newer = store.create(payload("newer", 1, &[1], true)).await.unwrap();

        // Touching the older banner makes it the latest revision
        store
            .update(older.id, payload("older v2", 1, &[1], true))
            .await
            .unwrap();

        let by_created = store
            .latest_by_filter(1, 1, RevisionOrder::CreatedAt)
            .await
            .unwrap()
            .unwrap();
        let by_updated = store
            .latest_by_filter(1, 1, RevisionOrder::UpdatedAt)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_created.id, newer.id);
        assert_eq!(by_updated.id, older.id);
        assert_eq!(by_updated.title, "older v2");
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let store = MemoryBannerStore::new();
        let created = store.create(payload("a", 1, &[1], true)).await.unwrap();

        let updated = store
            .update(created.id, payload("b", 3, &[4], false))
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.feature.id, 3);
        assert_eq!(updated.tags[0].id, 4);
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = MemoryBannerStore::new();

        assert_eq!(
            store.update(9, payload("a", 1, &[1], true)).await,
            Err(StoreError::NotFound(9))
        );
        assert_eq!(store.delete(9).await, Err(StoreError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryBannerStore::new();
        let banner = store.create(payload("a", 1, &[1], true)).await.unwrap();

        store.delete(banner.id).await.unwrap();

        assert!(store.is_empty().await);
        assert!(store
            .latest_by_filter(1, 1, RevisionOrder::CreatedAt)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_filtered_with_paging() {
        let store = MemoryBannerStore::new();
        for i in 0..5 {
            store
                .create(payload(&format!("b{}", i), 1 + i % 2, &[10 + i % 3], true))
                .await
                .unwrap();
        }

        let all = store.filtered(BannerFilter::default()).await.unwrap();
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

        let feature_one = store
            .filtered(BannerFilter {
                feature_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(feature_one.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3, 5]);

        let tagged = store
            .filtered(BannerFilter {
                tag_id: Some(10),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tagged.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 4]);

        let page = store
            .filtered(BannerFilter {
                limit: Some(2),
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
