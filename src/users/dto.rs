use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::domain::{Phone, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phones: Option<Vec<PhoneDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneDto {
    pub number: String,
    pub city_code: String,
    pub country_code: String,
}

impl From<PhoneDto> for Phone {
    fn from(p: PhoneDto) -> Self {
        Phone::new(p.number, p.city_code, p.country_code)
    }
}

impl From<&Phone> for PhoneDto {
    fn from(p: &Phone) -> Self {
        Self {
            number: p.number.clone(),
            city_code: p.city_code.clone(),
            country_code: p.country_code.clone(),
        }
    }
}

/// Public view of a user. The password hash is deliberately absent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    pub token: Option<String>,
    pub is_active: bool,
    pub phones: Vec<PhoneDto>,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            created: u.created,
            modified: u.modified,
            last_login: u.last_login,
            token: u.token.clone(),
            is_active: u.is_active,
            phones: u.phones.iter().map(PhoneDto::from).collect(),
        }
    }
}
