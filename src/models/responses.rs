//! Response DTOs for the banner API
//!
//! Banners themselves are serialized directly; these cover the remaining bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `DELETE /banner/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("banner with ID (id {}) deleted", id),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses, expired reads included
    pub misses: u64,
    /// Entries removed because their TTL elapsed
    pub expired: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Lifetime of a cache entry in seconds
    pub ttl_seconds: u64,
}

impl StatsResponse {
    /// Builds the response from a counter snapshot and the cache TTL
    pub fn new(stats: CacheStats, ttl: Duration) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            total_entries: stats.total_entries,
            ttl_seconds: ttl.as_secs(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_message() {
        let resp = DeleteResponse::new(42);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("id 42"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_stats_response_new() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            expired: 5,
            total_entries: 12,
        };
        let resp = StatsResponse::new(stats, Duration::from_secs(300));
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.ttl_seconds, 300);
        assert_eq!(resp.expired, 5);
        assert_eq!(resp.total_entries, 12);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(CacheStats::default(), Duration::ZERO);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Banner not available");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Banner not available"}"#);
    }
}
