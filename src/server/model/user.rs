use anyhow::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// argon2 hash, never leaves the server
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for User {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            password: row.try_get("password")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            avatar: row.try_get("avatar")?,
            token: row.try_get("token")?,
            refresh_token: row.try_get("refresh_token")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SignUpRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100))]
    pub last_name: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "$argon2id$secret".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            avatar: None,
            token: None,
            refresh_token: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn signup_constraints() {
        let req: SignUpRequest = serde_json::from_value(serde_json::json!({
            "first_name": "A",
            "last_name": "Lovelace",
            "password": "short",
            "email": "not-an-email",
            "phone": "555-0100",
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("phone"));
    }
}
