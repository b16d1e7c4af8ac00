use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::UserSummary;

/// Assignment of a user to a todo as a responsible party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    pub id: i64,
    pub user: UserSummary,
    pub todo_id: i64,
}

/// Flat row shape of `managers JOIN users`.
#[derive(Debug, FromRow)]
pub struct ManagerRow {
    pub id: i64,
    pub todo_id: i64,
    pub user_id: i64,
    pub user_email: String,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: row.id,
            todo_id: row.todo_id,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewManager {
    pub user: UserSummary,
    pub todo_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManagerSaveRequest {
    pub manager_user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserSummary,
}

impl From<Manager> for ManagerResponse {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            user: manager.user,
        }
    }
}
