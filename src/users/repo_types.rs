use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::domain::{Phone, User};

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String, // argon2 PHC string
    pub created: OffsetDateTime,
    pub modified: OffsetDateTime,
    pub last_login: OffsetDateTime,
    pub token: Option<String>,
    pub is_active: bool,
}

/// Row of the `user_phones` table.
#[derive(Debug, Clone, FromRow)]
pub struct PhoneRow {
    pub number: String,
    pub city_code: String,
    pub country_code: String,
}

impl From<PhoneRow> for Phone {
    fn from(r: PhoneRow) -> Self {
        Self {
            number: r.number,
            city_code: r.city_code,
            country_code: r.country_code,
        }
    }
}

impl UserRow {
    /// Phones must already be ordered by position.
    pub fn into_domain(self, phones: Vec<PhoneRow>) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phones: phones.into_iter().map(Phone::from).collect(),
            created: self.created,
            modified: self.modified,
            last_login: self.last_login,
            token: self.token,
            is_active: self.is_active,
        }
    }
}
