//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::service::DEFAULT_STORE_TIMEOUT;

/// Secret used when `JWT_SECRET` is not set. Only suitable for local runs.
const DEV_JWT_SECRET: &str = "banner-service-dev-secret";

/// Upper bound for every configured duration (one year).
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds of cached user banners
    pub cache_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Deadline in seconds for a single store call
    pub store_timeout: u64,
    /// HMAC secret for signing and verifying tokens
    pub jwt_secret: String,
    /// Name of the cookie carrying the token
    pub token_cookie: String,
    /// Lifetime in seconds of tokens issued at login
    pub token_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `STORE_TIMEOUT` - Store call deadline in seconds (default: 10)
    /// - `JWT_SECRET` - Token signing secret
    /// - `TOKEN_COOKIE` - Token cookie name (default: token)
    /// - `TOKEN_TTL` - Login token lifetime in seconds (default: 86400)
    ///
    /// Durations are capped at [`MAX_DURATION_SECS`] by the accessors.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            store_timeout: env_or("STORE_TIMEOUT", defaults.store_timeout),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_cookie: env::var("TOKEN_COOKIE").unwrap_or(defaults.token_cookie),
            token_ttl: env_or("TOKEN_TTL", defaults.token_ttl),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        capped_secs(self.cache_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        capped_secs(self.sweep_interval.max(1))
    }

    pub fn store_timeout(&self) -> Duration {
        capped_secs(self.store_timeout)
    }

    pub fn token_ttl(&self) -> Duration {
        capped_secs(self.token_ttl)
    }
}

fn capped_secs(secs: u64) -> Duration {
    Duration::from_secs(secs.min(MAX_DURATION_SECS))
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_ttl: 300,
            sweep_interval: 60,
            store_timeout: DEFAULT_STORE_TIMEOUT.as_secs(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_cookie: "token".to_string(),
            token_ttl: 24 * 60 * 60,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("cache_ttl", &self.cache_ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("store_timeout", &self.store_timeout)
            .field("jwt_secret", &"<redacted>")
            .field("token_cookie", &self.token_cookie)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
