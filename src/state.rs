use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use crate::config::{AppConfig, PasswordPolicyConfig};
use crate::db;
use crate::users::{
    memory::InMemoryUserStore,
    password::Argon2Hasher,
    repo::{PgUserStore, UserStore},
    services::RegistrationService,
    token::{RsaTokenIssuer, TokenIssuer},
    validation::PasswordPolicy,
};

#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService>,
    pub password_policy: Arc<PasswordPolicy>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        // key problems stop the process here, never per request
        let issuer = RsaTokenIssuer::from_config(&config.jwt).context("load JWT signing keys")?;

        let store: Arc<dyn UserStore> = match &config.database {
            Some(db_cfg) => {
                let pool = db::connect(db_cfg).await?;
                db::migrate(&pool).await;
                Arc::new(PgUserStore::new(pool))
            }
            None => {
                warn!("DATABASE_URL not set; users are kept in memory");
                Arc::new(InMemoryUserStore::new())
            }
        };

        Ok(Self::from_parts(config.password, store, Arc::new(issuer)))
    }

    pub fn from_parts(
        password: PasswordPolicyConfig,
        store: Arc<dyn UserStore>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        let registration = RegistrationService::new(store, Arc::new(Argon2Hasher), issuer);
        Self {
            registration: Arc::new(registration),
            password_policy: Arc::new(PasswordPolicy::from_config(&password)),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let issuer = RsaTokenIssuer::from_config(&crate::users::token::tests::test_jwt_config())
            .expect("test keys load");
        Self::from_parts(
            PasswordPolicyConfig::default(),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(issuer),
        )
    }
}
