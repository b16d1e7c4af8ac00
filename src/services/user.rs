use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{ChangePasswordRequest, User, UserRole, UserRoleChangeRequest, UserSummary};
use crate::repositories::UserRepository;

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    async fn find_user(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".into()))
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserSummary, AppError> {
        Ok(self.find_user(user_id).await?.summary())
    }

    /// The request must already have passed `Validate` (password strength).
    pub async fn change_password(
        &self,
        user_id: i64,
        request: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;

        if verify_password(&request.new_password, &user.password_hash)? {
            return Err(AppError::BadRequest(
                "New password cannot be the same as the old password".into(),
            ));
        }
        if !verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::BadRequest("Wrong password".into()));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.users.update_password(user.id, &password_hash).await
    }

    pub async fn change_user_role(
        &self,
        user_id: i64,
        request: &UserRoleChangeRequest,
    ) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;
        let role: UserRole = request.role.parse()?;

        self.users.update_role(user.id, role).await?;
        log::info!("Changed role of user {} from {} to {}", user.id, user.user_role, role);
        Ok(())
    }
}
