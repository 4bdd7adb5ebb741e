use anyhow::Context;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::users::domain::User;

/// Issues signed credentials for a user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> anyhow::Result<String>;
}

/// JWT payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user id
    pub jti: Uuid,     // token id
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub email: String,
    pub name: String,
}

/// RS256 issuer: signs with the private key, publishes the public one.
#[derive(Clone)]
pub struct RsaTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    key_id: String,
    issuer: String,
    ttl: Duration,
}

impl RsaTokenIssuer {
    pub fn from_config(cfg: &JwtConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(cfg.ttl_minutes > 0, "JWT_TTL_MINUTES must be positive");
        let encoding = EncodingKey::from_rsa_pem(cfg.private_key_pem.as_bytes())
            .context("parse RSA private key")?;
        let decoding = DecodingKey::from_rsa_pem(cfg.public_key_pem.as_bytes())
            .context("parse RSA public key")?;
        Ok(Self {
            encoding,
            decoding,
            key_id: cfg.key_id.clone(),
            issuer: cfg.issuer.clone(),
            ttl: Duration::minutes(cfg.ttl_minutes),
        })
    }

    /// Verifies signature, issuer and expiry.
    pub fn decode(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl TokenIssuer for RsaTokenIssuer {
    fn issue(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user.id,
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
            email: user.email.clone(),
            name: user.name.clone(),
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_id.clone());
        let token = encode(&header, &claims, &self.encoding).context("sign access token")?;
        debug!(user_id = %user.id, jti = %claims.jti, "jwt signed");
        Ok(token)
    }
}
