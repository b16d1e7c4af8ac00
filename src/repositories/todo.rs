use async_trait::async_trait;
use sqlx::PgPool;

use super::TodoRepository;
use crate::error::AppError;
use crate::models::todo::TodoRow;
use crate::models::{NewTodo, Todo};

const TODO_SELECT: &str = "SELECT t.id, t.title, t.contents, t.weather, t.user_id, \
     u.email AS user_email, t.created_at, t.modified_at \
     FROM todos t JOIN users u ON u.id = t.user_id";

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn save(&self, todo: NewTodo) -> Result<Todo, AppError> {
        let mut tx = self.pool.begin().await?;

        let (id,) = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO todos (title, contents, weather, user_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&todo.title)
        .bind(&todo.contents)
        .bind(&todo.weather)
        .bind(todo.user.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO managers (user_id, todo_id) VALUES ($1, $2)")
            .bind(todo.user.id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, TodoRow>(&format!("{} WHERE t.id = $1", TODO_SELECT))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!("{} WHERE t.id = $1", TODO_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<Todo>, i64), AppError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{} ORDER BY t.modified_at DESC, t.id DESC LIMIT $1 OFFSET $2",
            TODO_SELECT
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Todo::from).collect(), total))
    }
}
