//! Banner domain types
//!
//! A banner belongs to exactly one feature and is tagged with one or more tags.
//! The JSON layout keeps the `feature_id` field name used by existing clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feature a banner is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Tag a banner is targeted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

// == Banner ==
/// A stored banner as returned by the store and served to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub url: String,
    pub is_active: bool,
    #[serde(rename = "feature_id")]
    pub feature: Feature,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Returns true if the banner carries the given tag.
    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|tag| tag.id == tag_id)
    }

    /// Whether a caller may see this banner.
    ///
    /// Admins see inactive banners, everyone else only sees active ones.
    pub fn is_visible_to(&self, is_admin: bool) -> bool {
        self.is_active || is_admin
    }
}
