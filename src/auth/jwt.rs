//! JWT cookie admin checker.

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AdminChecker, AuthError};

/// JWT claims carried in the token cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub is_admin: bool,
    /// Expiration timestamp (seconds since the epoch)
    pub exp: i64,
}

/// Validates HS256 tokens read from a named cookie.
#[derive(Clone)]
pub struct JwtAdminChecker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl JwtAdminChecker {
    /// Creates a checker for tokens signed with `secret` and sent in `cookie_name`.
    pub fn new(secret: &str, cookie_name: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Signs a token for `user_id` valid for `ttl`. A negative `ttl` yields
    /// an already expired token.
    pub fn issue_token(
        &self,
        user_id: i64,
        is_admin: bool,
        ttl: Duration,
    ) -> jsonwebtoken::errors::Result<String> {
        let claims = Claims {
            id: user_id,
            is_admin,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validates `token` and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidSignature => {
                        AuthError::InvalidToken("invalid token signature".to_string())
                    }
                    _ => AuthError::InvalidToken("invalid token".to_string()),
                }
            })
    }
}

impl std::fmt::Debug for JwtAdminChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAdminChecker")
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

impl AdminChecker for JwtAdminChecker {
    fn check_if_admin(&self, headers: &HeaderMap) -> Result<bool, AuthError> {
        let jar = CookieJar::from_headers(headers);
        let cookie = jar.get(&self.cookie_name).ok_or(AuthError::MissingToken)?;

        let claims = self.validate(cookie.value().trim())?;
        Ok(claims.is_admin)
    }
}
