use async_trait::async_trait;
use sqlx::PgPool;

use super::ManagerRepository;
use crate::error::AppError;
use crate::models::manager::ManagerRow;
use crate::models::{Manager, NewManager};

const MANAGER_SELECT: &str = "SELECT m.id, m.todo_id, m.user_id, u.email AS user_email \
     FROM managers m JOIN users u ON u.id = m.user_id";

pub struct PgManagerRepository {
    pool: PgPool,
}

impl PgManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for PgManagerRepository {
    async fn save(&self, manager: NewManager) -> Result<Manager, AppError> {
        let (id,) = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO managers (user_id, todo_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(manager.user.id)
        .bind(manager.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Manager {
            id,
            user: manager.user,
            todo_id: manager.todo_id,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError> {
        let row = sqlx::query_as::<_, ManagerRow>(&format!("{} WHERE m.id = $1", MANAGER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Manager::from))
    }

    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Manager>, AppError> {
        let rows = sqlx::query_as::<_, ManagerRow>(&format!(
            "{} WHERE m.todo_id = $1 ORDER BY m.id",
            MANAGER_SELECT
        ))
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Manager::from).collect())
    }

    async fn delete(&self, manager: &Manager) -> Result<(), AppError> {
        sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(manager.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
