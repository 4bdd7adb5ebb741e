use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub private_key_pem: String,
    pub public_key_pem: String,
    pub key_id: String,
    pub issuer: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordPolicyConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub symbols: String,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 20,
            symbols: "@$!%*?&".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub password: PasswordPolicyConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = match std::env::var("DATABASE_URL") {
            Ok(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10),
            }),
            Err(_) => None,
        };
        let jwt = JwtConfig {
            private_key_pem: pem_var("JWT_PRIVATE_KEY")?,
            public_key_pem: pem_var("JWT_PUBLIC_KEY")?,
            key_id: std::env::var("JWT_KEY_ID").unwrap_or_else(|_| "registration".into()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "registration".into()),
            ttl_minutes: parse_var("JWT_TTL_MINUTES", 60 * 24),
        };
        let defaults = PasswordPolicyConfig::default();
        let password = PasswordPolicyConfig {
            min_length: parse_var("PASSWORD_MIN_LENGTH", defaults.min_length),
            max_length: parse_var("PASSWORD_MAX_LENGTH", defaults.max_length),
            symbols: std::env::var("PASSWORD_SYMBOLS").unwrap_or(defaults.symbols),
        };
        anyhow::ensure!(
            password.min_length <= password.max_length,
            "PASSWORD_MIN_LENGTH must not exceed PASSWORD_MAX_LENGTH"
        );
        Ok(Self {
            database,
            jwt,
            password,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Reads `<PREFIX>_PEM` inline, falling back to the file named by `<PREFIX>_PATH`.
fn pem_var(prefix: &str) -> anyhow::Result<String> {
    if let Ok(pem) = std::env::var(format!("{prefix}_PEM")) {
        // single-line env values carry escaped newlines
        return Ok(pem.replace("\\n", "\n"));
    }
    let path_var = format!("{prefix}_PATH");
    let path = std::env::var(&path_var)
        .with_context(|| format!("either {prefix}_PEM or {path_var} must be set"))?;
    std::fs::read_to_string(&path).with_context(|| format!("read {path_var}={path}"))
}
