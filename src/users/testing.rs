//! Test doubles for the registration collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::users::{
    domain::User, errors::StoreError, memory::InMemoryUserStore, password::PasswordHasher,
    repo::UserStore, token::TokenIssuer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    Find,
    Upsert,
}

/// In-memory store that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryUserStore,
    pub find_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
    failure: Option<StoreFailure>,
    lowercase_email: bool,
}

impl CountingStore {
    pub fn failing(failure: StoreFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Lowercases emails on write, like a store with its own normalization.
    pub fn normalizing() -> Self {
        Self {
            lowercase_email: true,
            ..Self::default()
        }
    }

    fn transport_error(operation: &'static str) -> StoreError {
        StoreError::new(
            operation,
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer"),
        )
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure == Some(StoreFailure::Find) {
            return Err(Self::transport_error("find user by email"));
        }
        self.inner.find_by_email(email).await
    }

    async fn upsert(&self, user: &User) -> Result<User, StoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure == Some(StoreFailure::Upsert) {
            return Err(Self::transport_error("save user"));
        }
        if self.lowercase_email {
            let mut normalized = user.clone();
            normalized.email = normalized.email.to_lowercase();
            return self.inner.upsert(&normalized).await;
        }
        self.inner.upsert(user).await
    }
}

pub struct CountingHasher {
    inner: Box<dyn PasswordHasher>,
    pub calls: AtomicUsize,
}

impl CountingHasher {
    pub fn new(inner: impl PasswordHasher + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            calls: AtomicUsize::new(0),
        }
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.hash(plain)
    }
}

/// Issuer returning a fixed token, or failing like a misconfigured key.
pub struct CountingIssuer {
    token: Option<String>,
    pub calls: AtomicUsize,
}

impl CountingIssuer {
    pub fn ok(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            token: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl TokenIssuer for CountingIssuer {
    fn issue(&self, _user: &User) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("signing key unavailable"))
    }
}
