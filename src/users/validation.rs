use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::config::PasswordPolicyConfig;
use crate::users::dto::{PhoneDto, RegisterRequest};

const NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const PHONE_NUMBER_MAX: usize = 20;
const PHONE_CODE_MAX: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required and must be at most 50 characters")]
    Name,
    #[error("email has an invalid format")]
    Email,
    #[error(
        "the password must be {min} to {max} characters long, include at least one uppercase letter, \
         one lowercase letter, one digit, and one symbol ({symbols}), and must not contain spaces"
    )]
    Password {
        min: usize,
        max: usize,
        symbols: String,
    },
    #[error(
        "phone #{0} requires number (at most 20 characters), cityCode and countryCode \
         (at most 10 characters each)"
    )]
    Phone(usize),
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    email.len() <= EMAIL_MAX && EMAIL_RE.is_match(email)
}

/// Password strength rules; the character set is closed to letters,
/// digits and the configured symbols.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min: usize,
    max: usize,
    symbols: String,
}

impl PasswordPolicy {
    pub fn from_config(cfg: &PasswordPolicyConfig) -> Self {
        Self {
            min: cfg.min_length,
            max: cfg.max_length,
            symbols: cfg.symbols.clone(),
        }
    }

    pub fn is_valid(&self, password: &str) -> bool {
        let len = password.chars().count();
        if len < self.min || len > self.max {
            return false;
        }
        let is_symbol = |c: char| self.symbols.contains(c);
        password.chars().all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(is_symbol)
    }

    fn error(&self) -> ValidationError {
        ValidationError::Password {
            min: self.min,
            max: self.max,
            symbols: self.symbols.clone(),
        }
    }
}

/// Trims free-text fields in place, then checks the request.
pub fn validate_register(
    req: &mut RegisterRequest,
    policy: &PasswordPolicy,
) -> Result<(), ValidationError> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_string();

    if req.name.is_empty() || req.name.chars().count() > NAME_MAX {
        return Err(ValidationError::Name);
    }
    if !is_valid_email(&req.email) {
        return Err(ValidationError::Email);
    }
    if !policy.is_valid(&req.password) {
        return Err(policy.error());
    }
    for (i, p) in req.phones.iter().flatten().enumerate() {
        if !is_valid_phone(p) {
            return Err(ValidationError::Phone(i));
        }
    }
    Ok(())
}

fn is_valid_phone(p: &PhoneDto) -> bool {
    let fits = |s: &str, max: usize| !s.trim().is_empty() && s.chars().count() <= max;
    fits(p.number.as_str(), PHONE_NUMBER_MAX)
        && fits(p.city_code.as_str(), PHONE_CODE_MAX)
        && fits(p.country_code.as_str(), PHONE_CODE_MAX)
}
