use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::UserSummary;

/// A comment written by a user on a todo.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
    pub todo_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Flat row shape of `comments JOIN users`.
#[derive(Debug, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub contents: String,
    pub todo_id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            contents: row.contents,
            todo_id: row.todo_id,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub contents: String,
    pub user: UserSummary,
    pub todo_id: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CommentSaveRequest {
    #[validate(length(min = 1, max = 1000))]
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: comment.user,
        }
    }
}
