use async_trait::async_trait;
use sqlx::PgPool;

use super::CommentRepository;
use crate::error::AppError;
use crate::models::comment::CommentRow;
use crate::models::{Comment, NewComment};

const COMMENT_SELECT: &str = "SELECT c.id, c.contents, c.todo_id, c.user_id, \
     u.email AS user_email, c.created_at, c.modified_at \
     FROM comments c JOIN users u ON u.id = c.user_id";

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn save(&self, comment: NewComment) -> Result<Comment, AppError> {
        let (id, created_at, modified_at) = sqlx::query_as::<
            _,
            (i64, chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>),
        >(
            "INSERT INTO comments (contents, user_id, todo_id) VALUES ($1, $2, $3) \
             RETURNING id, created_at, modified_at",
        )
        .bind(&comment.contents)
        .bind(comment.user.id)
        .bind(comment.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Comment {
            id,
            contents: comment.contents,
            user: comment.user,
            todo_id: comment.todo_id,
            created_at,
            modified_at,
        })
    }

    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{} WHERE c.todo_id = $1 ORDER BY c.id",
            COMMENT_SELECT
        ))
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
