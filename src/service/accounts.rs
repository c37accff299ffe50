//! Account Service
//!
//! Registration and password login. A successful login yields a signed token
//! that the HTTP layer hands back as a cookie.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use super::with_deadline;
use crate::auth::{JwtAdminChecker, PasswordHasher};
use crate::error::{BannerError, Result};
use crate::models::{LoginRequest, NewUser, RegisterRequest, User};
use crate::store::UserStore;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<JwtAdminChecker>,
    store_timeout: Duration,
    token_ttl: Duration,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<JwtAdminChecker>,
        store_timeout: Duration,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            store_timeout,
            token_ttl,
        }
    }

    /// Name of the cookie a login token is returned in.
    pub fn cookie_name(&self) -> &str {
        self.tokens.cookie_name()
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    // == Register ==
    /// Creates an account, storing only the Argon2 hash of the password.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        if let Some(message) = request.validate() {
            return Err(BannerError::Validation(message));
        }

        let password_hash = self.hash_password(request.password).await?;
        let user = NewUser {
            name: request.name,
            email: request.email,
            password_hash,
            is_admin: request.is_admin,
        };

        let user = with_deadline(self.store_timeout, "create_user", self.users.create(user)).await?;
        info!(id = user.id, is_admin = user.is_admin, "user registered");
        Ok(user)
    }

    // == Login ==
    /// Checks the credentials and returns the user with a fresh token.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, String)> {
        if let Some(message) = request.validate() {
            return Err(BannerError::Validation(message));
        }

        let found = with_deadline(
            self.store_timeout,
            "find_user_by_email",
            self.users.find_by_email(&request.email),
        )
        .await?;
        let Some(user) = found else {
            return Err(BannerError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self
            .verify_password(request.password, user.password_hash.clone())
            .await?
        {
            return Err(BannerError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let ttl = chrono::Duration::from_std(self.token_ttl)
            .map_err(|e| BannerError::Internal(format!("token ttl out of range: {}", e)))?;
        let token = self
            .tokens
            .issue_token(user.id, user.is_admin, ttl)
            .map_err(|e| {
                error!("failed to sign token: {}", e);
                BannerError::Internal(e.to_string())
            })?;

        info!(id = user.id, "user logged in");
        Ok((user, token))
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| BannerError::Internal(format!("hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| BannerError::Internal(format!("verification task failed: {}", e)))?
    }
}
