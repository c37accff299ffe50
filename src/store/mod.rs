//! Banner Store Module
//!
//! The persistence contracts the services are written against, and the
//! in-process implementations used by the server binary and tests.

mod memory;
mod users;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Banner, BannerFilter, BannerPayload};

pub use memory::MemoryBannerStore;
pub use users::{MemoryUserStore, UserStore};

/// Column a "latest banner" lookup orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionOrder {
    /// Most recently created banner
    CreatedAt,
    /// Most recently updated banner
    UpdatedAt,
}

/// Errors reported by a [`BannerStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No banner with this id
    #[error("banner {0} does not exist")]
    NotFound(i64),

    /// A unique field is already taken
    #[error("{0}")]
    Conflict(String),

    /// Failure of the underlying storage
    #[error("storage failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Authoritative source of banners.
#[async_trait]
pub trait BannerStore: Send + Sync {
    /// Latest banner with `feature_id` that carries `tag_id`, by `order`.
    async fn latest_by_filter(
        &self,
        tag_id: i64,
        feature_id: i64,
        order: RevisionOrder,
    ) -> StoreResult<Option<Banner>>;

    /// Banners matching the filter, ordered by id.
    async fn filtered(&self, filter: BannerFilter) -> StoreResult<Vec<Banner>>;

    /// Stores a new banner, assigning its id and timestamps.
    async fn create(&self, payload: BannerPayload) -> StoreResult<Banner>;

    /// Replaces the content of banner `id`, keeping its creation time.
    async fn update(&self, id: i64, payload: BannerPayload) -> StoreResult<Banner>;

    /// Removes banner `id`.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
