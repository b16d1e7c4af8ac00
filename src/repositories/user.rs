use async_trait::async_trait;
use sqlx::PgPool;

use super::UserRepository;
use crate::error::AppError;
use crate::models::{NewUser, User, UserRole, EMAIL_ALREADY_EXISTS};

const USER_COLUMNS: &str = "id, email, password_hash, user_role, created_at, modified_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique violation on insert means a concurrent signup claimed the email first.
fn email_conflict(error: sqlx::Error) -> AppError {
    let unique = error
        .as_database_error()
        .map_or(false, |db| db.is_unique_violation());
    if unique {
        AppError::BadRequest(EMAIL_ALREADY_EXISTS.into())
    } else {
        error.into()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: NewUser) -> Result<User, AppError> {
        let saved = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, user_role) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.user_role)
        .fetch_one(&self.pool)
        .await
        .map_err(email_conflict)?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let (exists,) =
            sqlx::query_as::<_, (bool,)>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $1, modified_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET user_role = $1, modified_at = NOW() WHERE id = $2")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
