//! Request DTOs for the banner API
//!
//! Query strings are taken as raw strings and parsed here so that malformed
//! values produce the service's own validation errors.

use serde::Deserialize;

use crate::error::{BannerError, Result};
use crate::models::{Feature, Tag};

// == User Banner Query ==
/// Query string of `GET /user_banner`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserBannerQuery {
    pub tag_id: Option<String>,
    pub feature_id: Option<String>,
    pub use_last_revision: Option<String>,
}

/// Parsed form of [`UserBannerQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserBannerParams {
    pub tag_id: i64,
    pub feature_id: i64,
    pub use_last_revision: bool,
}

impl UserBannerQuery {
    /// Parses and validates the query.
    ///
    /// `tag_id` and `feature_id` are required integers. An absent or
    /// unparseable `use_last_revision` means `false`.
    pub fn parse(&self) -> Result<UserBannerParams> {
        let tag_id = parse_required_id("tag_id", self.tag_id.as_deref())?;
        let feature_id = parse_required_id("feature_id", self.feature_id.as_deref())?;
        let use_last_revision = self
            .use_last_revision
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        Ok(UserBannerParams {
            tag_id,
            feature_id,
            use_last_revision,
        })
    }
}

// == Banner Filter Query ==
/// Query string of `GET /banner`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerFilterQuery {
    pub feature_id: Option<String>,
    pub tag_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filter passed to the store when listing banners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BannerFilter {
    pub feature_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl BannerFilterQuery {
    /// Parses the listing filter. Every field is optional.
    pub fn parse(&self) -> Result<BannerFilter> {
        Ok(BannerFilter {
            feature_id: parse_optional("feature_id", self.feature_id.as_deref())?,
            tag_id: parse_optional("tag_id", self.tag_id.as_deref())?,
            limit: parse_optional("limit", self.limit.as_deref())?,
            offset: parse_optional("offset", self.offset.as_deref())?.unwrap_or(0),
        })
    }
}

// == Banner Payload ==
/// Request body of `POST /banner` and `PUT /banner/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BannerPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "feature_id")]
    pub feature: Option<Feature>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl BannerPayload {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("title is required".to_string());
        }
        if self.text.trim().is_empty() {
            return Some("text is required".to_string());
        }
        if self.url.trim().is_empty() {
            return Some("url is required".to_string());
        }
        if self.feature.is_none() {
            return Some("feature_id is required".to_string());
        }
        if self.tags.is_empty() {
            return Some("at least one tag is required".to_string());
        }
        None
    }
}

// == Parsing Helpers ==
fn parse_required_id(name: &str, raw: Option<&str>) -> Result<i64> {
    raw.and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| BannerError::Validation(format!("Invalid {} parameter", name)))
}

fn parse_optional<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| BannerError::Validation(format!("Invalid {} parameter", name))),
    }
}

/// Boolean spellings accepted for `use_last_revision`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
