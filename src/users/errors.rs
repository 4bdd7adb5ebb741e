use std::error::Error as StdError;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Any failure below the store boundary, whatever the backend.
#[derive(Debug, Error)]
#[error("store failure: {operation}")]
pub struct StoreError {
    operation: &'static str,
    unique_violation: bool,
    #[source]
    source: BoxError,
}

impl StoreError {
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            unique_violation: false,
            source: source.into(),
        }
    }

    pub fn unique_violation(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            unique_violation: true,
            ..Self::new(operation, source)
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// True when the write was rejected by a uniqueness constraint.
    pub fn is_unique_violation(&self) -> bool {
        self.unique_violation
    }
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Hasher or token issuer failure; not translated.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
