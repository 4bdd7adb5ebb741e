use std::sync::Arc;

use anyhow::Context;
use tracing::{info, instrument, warn};

use crate::users::{
    domain::{Phone, User},
    errors::RegistrationError,
    password::PasswordHasher,
    repo::UserStore,
    token::TokenIssuer,
};

pub const CONFLICT_MESSAGE: &str = "user with this email already exists.";

/// Already validated registration data.
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub raw_password: String,
    pub phones: Option<Vec<Phone>>,
}

/// Registration use case: uniqueness check, hash, token, persist.
///
/// Holds no per-request state; a single instance serves concurrent requests.
/// Two requests racing on the same email can both pass the lookup; the
/// store's uniqueness check at write time rejects the second one and that
/// failure is returned as is, without retry.
pub struct RegistrationService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, RegistrationError> {
        if self.store.find_by_email(&input.email).await?.is_some() {
            warn!("email already registered");
            return Err(RegistrationError::Conflict(CONFLICT_MESSAGE.into()));
        }

        let RegisterInput {
            name,
            email,
            raw_password,
            phones,
        } = input;

        let password_hash = self.hash(raw_password).await?;
        let mut user = User::new_user(name, email, password_hash, phones.unwrap_or_default());

        let token = self.issuer.issue(&user)?;
        user.attach_token(token);

        let saved = self.store.upsert(&user).await?;
        info!(user_id = %saved.id, "user registered");
        Ok(saved)
    }

    /// Argon2 is CPU bound; keep it off the async workers.
    async fn hash(&self, raw_password: String) -> anyhow::Result<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&raw_password))
            .await
            .context("password hashing task")?
    }
}
