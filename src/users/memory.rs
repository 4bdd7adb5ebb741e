use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::users::{domain::User, errors::StoreError, repo::UserStore};

/// Process-local store used when no database is configured.
///
/// Email uniqueness is checked under the write lock, so it plays the role of
/// the database's unique index.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let key = email.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.to_lowercase() == key)
            .cloned())
    }

    async fn upsert(&self, user: &User) -> Result<User, StoreError> {
        let key = user.email.to_lowercase();
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|u| u.id != user.id && u.email.to_lowercase() == key);
        if taken {
            warn!(user_id = %user.id, email = %user.email, "email already held by another user");
            return Err(StoreError::unique_violation(
                "save user",
                format!("duplicate email {}", user.email),
            ));
        }

        let mut stored = user.clone();
        if let Some(existing) = users.get(&user.id) {
            stored.created = existing.created;
        }
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
