//! password hashing and signed token issuance for users

use anyhow::{anyhow, Error};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use crate::server::util::time::helper::get_utc_now;

const TOKEN_TTL_HOURS: i64 = 24;
const REFRESH_TOKEN_TTL_HOURS: i64 = 168;

pub(crate) fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password, {}", e))?;
    Ok(hash.to_string())
}

pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RefreshClaims {
    pub email: String,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Signs access and refresh tokens with a shared HMAC secret.
#[derive(Clone)]
pub(crate) struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, email: &str, first_name: &str, last_name: &str, phone: &str) -> Result<TokenPair, Error> {
        let now = get_utc_now().and_utc();
        let claims = Claims {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        let refresh = RefreshClaims {
            email: email.to_string(),
            exp: (now + Duration::hours(REFRESH_TOKEN_TTL_HOURS)).timestamp(),
        };
        Ok(TokenPair {
            token: encode(&Header::default(), &claims, &self.key)?,
            refresh_token: encode(&Header::default(), &refresh, &self.key)?,
        })
    }
}
