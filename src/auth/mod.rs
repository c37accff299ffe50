//! Admin Check Module
//!
//! Callers authenticate with a signed JWT carried in a cookie, obtained by
//! logging in with a password. The only authorization decision the service
//! makes is whether the caller is an admin.

mod jwt;
mod password;

use axum::http::HeaderMap;
use thiserror::Error;

pub use jwt::{Claims, JwtAdminChecker};
pub use password::PasswordHasher;

/// Reasons a request's credentials are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing token cookie")]
    MissingToken,

    #[error("{0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,
}

/// Decides whether the caller behind a request is an admin.
///
/// `Ok(false)` is a valid non-admin caller; `Err` means the caller could not
/// be authenticated at all.
pub trait AdminChecker: Send + Sync {
    fn check_if_admin(&self, headers: &HeaderMap) -> Result<bool, AuthError>;
}

/// Checker that ignores the request and returns a preset outcome.
#[derive(Debug, Clone)]
pub struct FixedAdminChecker {
    outcome: Result<bool, AuthError>,
}

impl FixedAdminChecker {
    /// Every caller is an admin.
    pub fn admin() -> Self {
        Self { outcome: Ok(true) }
    }

    /// Every caller is an authenticated non-admin.
    pub fn user() -> Self {
        Self { outcome: Ok(false) }
    }

    /// Every caller is rejected with `err`.
    pub fn rejecting(err: AuthError) -> Self {
        Self { outcome: Err(err) }
    }
}

impl AdminChecker for FixedAdminChecker {
    fn check_if_admin(&self, _headers: &HeaderMap) -> Result<bool, AuthError> {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_checker_outcomes() {
        let headers = HeaderMap::new();
        assert_eq!(FixedAdminChecker::admin().check_if_admin(&headers), Ok(true));
        assert_eq!(FixedAdminChecker::user().check_if_admin(&headers), Ok(false));
        assert_eq!(
            FixedAdminChecker::rejecting(AuthError::TokenExpired).check_if_admin(&headers),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_checker_is_object_safe() {
        let checker: Box<dyn AdminChecker> = Box::new(FixedAdminChecker::user());
        assert_eq!(checker.check_if_admin(&HeaderMap::new()), Ok(false));
    }
}
