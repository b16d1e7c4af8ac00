use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::AppError;

lazy_static! {
    static ref DIGIT_REGEX: regex::Regex = regex::Regex::new(r"[0-9]").unwrap();
    static ref UPPERCASE_REGEX: regex::Regex = regex::Regex::new(r"[A-Z]").unwrap();
}

pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";

/// Role of a user account.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl FromStr for UserRole {
    type Err = AppError;

    /// Case-insensitive; anything but `USER`/`ADMIN` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(AppError::BadRequest("Invalid UserRole".into())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserRole::User => f.write_str("USER"),
            UserRole::Admin => f.write_str("ADMIN"),
        }
    }
}

/// A user account as stored in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Values needed to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub user_role: UserRole,
}

/// The public projection of a user embedded in todo, manager and comment responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,
    /// At least 8 characters, with at least one digit and one uppercase letter.
    #[validate(custom = "validate_new_password")]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserRoleChangeRequest {
    #[validate(length(min = 1))]
    pub role: String,
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8
        || !DIGIT_REGEX.is_match(password)
        || !UPPERCASE_REGEX.is_match(password)
    {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(
            "New password must be at least 8 characters and contain a digit and an uppercase letter"
                .into(),
        );
        return Err(error);
    }
    Ok(())
}
