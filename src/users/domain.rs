use std::fmt;
use std::hash::{Hash, Hasher};

use time::OffsetDateTime;
use uuid::Uuid;

/// Phone number owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub number: String,
    pub city_code: String,
    pub country_code: String,
}

impl Phone {
    pub fn new(
        number: impl Into<String>,
        city_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            city_code: city_code.into(),
            country_code: country_code.into(),
        }
    }
}

/// Registered account. Two users are equal when their ids are equal.
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phones: Vec<Phone>,
    pub created: OffsetDateTime,
    pub modified: OffsetDateTime,
    pub last_login: OffsetDateTime,
    pub token: Option<String>,
    pub is_active: bool,
}

impl User {
    /// Builds a fresh, not yet persisted user with a new id and current timestamps.
    pub fn new_user(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        phones: Vec<Phone>,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phones,
            created: now,
            modified: now,
            last_login: now,
            token: None,
            is_active: true,
        }
    }

    /// Stores a freshly issued token and bumps `modified` / `last_login`.
    pub fn attach_token(&mut self, token: String) {
        let now = OffsetDateTime::now_utc();
        self.token = Some(token);
        // wall clock may step backwards; timestamps must not
        self.modified = self.modified.max(now);
        self.last_login = self.last_login.max(now);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("phones", &self.phones)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .field("last_login", &self.last_login)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("is_active", &self.is_active)
            .finish()
    }
}
