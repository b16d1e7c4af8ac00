use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{ManagerResponse, ManagerSaveRequest, NewManager, Todo};
use crate::repositories::{ManagerRepository, TodoRepository, UserRepository};

pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const INVALID_TODO_OWNER: &str = "The user who created the todo is not valid";
pub const MANAGER_NOT_FOUND: &str = "Manager not found";
pub const MANAGER_NOT_ASSIGNED: &str = "The manager is not assigned to this todo";
pub const MANAGER_USER_NOT_FOUND: &str = "Manager user does not exist";
pub const SELF_ASSIGNMENT: &str = "The todo owner cannot assign themselves as a manager";

/// Assignment of users to todos.
pub struct ManagerService {
    managers: Arc<dyn ManagerRepository>,
    users: Arc<dyn UserRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl ManagerService {
    pub fn new(
        managers: Arc<dyn ManagerRepository>,
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
    ) -> Self {
        Self {
            managers,
            users,
            todos,
        }
    }

    async fn find_todo(&self, todo_id: i64) -> Result<Todo, AppError> {
        self.todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(TODO_NOT_FOUND.into()))
    }

    /// Looks up the todo and checks that `auth_user` created it.
    async fn find_owned_todo(&self, auth_user: &AuthUser, todo_id: i64) -> Result<Todo, AppError> {
        let todo = self.find_todo(todo_id).await?;
        if todo.user.id != auth_user.id {
            return Err(AppError::BadRequest(INVALID_TODO_OWNER.into()));
        }
        Ok(todo)
    }

    pub async fn save_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        request: &ManagerSaveRequest,
    ) -> Result<ManagerResponse, AppError> {
        let todo = self.find_owned_todo(auth_user, todo_id).await?;

        let assignee = self
            .users
            .find_by_id(request.manager_user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(MANAGER_USER_NOT_FOUND.into()))?;

        if assignee.id == todo.user.id {
            return Err(AppError::BadRequest(SELF_ASSIGNMENT.into()));
        }

        let manager = self
            .managers
            .save(NewManager {
                user: assignee.summary(),
                todo_id: todo.id,
            })
            .await?;
        Ok(manager.into())
    }

    pub async fn get_managers(&self, todo_id: i64) -> Result<Vec<ManagerResponse>, AppError> {
        let todo = self.find_todo(todo_id).await?;
        let managers = self.managers.find_all_by_todo_id(todo.id).await?;
        Ok(managers.into_iter().map(ManagerResponse::from).collect())
    }

    /// Removes a manager from a todo the caller owns.
    ///
    /// Guards, in order: the todo exists, the caller created it, the manager
    /// exists, and the manager belongs to that todo.
    pub async fn delete_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        manager_id: i64,
    ) -> Result<(), AppError> {
        let todo = self.find_owned_todo(auth_user, todo_id).await?;

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(MANAGER_NOT_FOUND.into()))?;

        if manager.todo_id != todo.id {
            return Err(AppError::BadRequest(MANAGER_NOT_ASSIGNED.into()));
        }

        self.managers.delete(&manager).await?;
        log::info!(
            "User {} removed manager {} from todo {}",
            auth_user.id,
            manager.id,
            todo.id
        );
        Ok(())
    }
}
