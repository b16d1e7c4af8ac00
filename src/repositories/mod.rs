//! Persistence seams.
//!
//! Each entity has an `async_trait` repository so that services can be built
//! over PostgreSQL in production and over in-memory fakes in tests. The
//! `Pg*Repository` types are the sqlx implementations.

pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{
    Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Todo, User, UserRole,
};

pub use comment::PgCommentRepository;
pub use manager::PgManagerRepository;
pub use todo::PgTodoRepository;
pub use user::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;
    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persists the todo and registers its owner as the first manager.
    async fn save(&self, todo: NewTodo) -> Result<Todo, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError>;
    /// Todos ordered by `modified_at` descending, plus the total count.
    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<Todo>, i64), AppError>;
}

#[async_trait]
pub trait ManagerRepository: Send + Sync {
    async fn save(&self, manager: NewManager) -> Result<Manager, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError>;
    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Manager>, AppError>;
    async fn delete(&self, manager: &Manager) -> Result<(), AppError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn save(&self, comment: NewComment) -> Result<Comment, AppError>;
    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Comment>, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

/// Creates a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPool::connect(database_url).await?;
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
