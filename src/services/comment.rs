use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{CommentResponse, CommentSaveRequest, NewComment};
use crate::repositories::{CommentRepository, TodoRepository};

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { comments, todos }
    }

    pub async fn save_comment(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        request: CommentSaveRequest,
    ) -> Result<CommentResponse, AppError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Todo not found".into()))?;

        let comment = self
            .comments
            .save(NewComment {
                contents: request.contents,
                user: auth_user.summary(),
                todo_id: todo.id,
            })
            .await?;
        Ok(comment.into())
    }

    pub async fn get_comments(&self, todo_id: i64) -> Result<Vec<CommentResponse>, AppError> {
        let comments = self.comments.find_all_by_todo_id(todo_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Admin-only removal.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), AppError> {
        self.comments.delete_by_id(comment_id).await
    }
}
