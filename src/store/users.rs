//! Account storage.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StoreError, StoreResult};
use crate::models::{NewUser, User};

/// Authoritative source of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new account, assigning its id. Emails are unique.
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

#[derive(Debug)]
struct State {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// User store kept entirely in process memory.
#[derive(Debug)]
pub struct MemoryUserStore {
    state: RwLock<State>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }

        let id = state.next_id;
        state.next_id += 1;

        let user = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
        };
        state.users.insert(id, user.clone());

        debug!(id, "user created");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}
