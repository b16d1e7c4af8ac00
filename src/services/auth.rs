use std::sync::Arc;

use crate::auth::{hash_password, verify_password, AuthResponse, JwtKeys, SigninRequest, SignupRequest};
use crate::error::AppError;
use crate::models::{NewUser, UserRole, EMAIL_ALREADY_EXISTS};
use crate::repositories::UserRepository;

/// Account registration and sign-in.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, AppError> {
        if self.users.exists_by_email(&request.email).await? {
            return Err(AppError::BadRequest(EMAIL_ALREADY_EXISTS.into()));
        }

        let user_role: UserRole = request.user_role.parse()?;
        let password_hash = hash_password(&request.password)?;

        let user = self
            .users
            .save(NewUser {
                email: request.email,
                password_hash,
                user_role,
            })
            .await?;
        log::info!("Registered user {} with role {}", user.id, user.user_role);

        let bearer_token = self.keys.create_token(user.id, &user.email, user.user_role)?;
        Ok(AuthResponse { bearer_token })
    }

    pub async fn signin(&self, request: SigninRequest) -> Result<AuthResponse, AppError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not registered".into()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Wrong password".into()));
        }

        let bearer_token = self.keys.create_token(user.id, &user.email, user.user_role)?;
        Ok(AuthResponse { bearer_token })
    }
}
