pub mod auth;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtKeys;
use crate::repositories::{
    CommentRepository, ManagerRepository, PgCommentRepository, PgManagerRepository,
    PgTodoRepository, PgUserRepository, TodoRepository, UserRepository,
};
use crate::weather::WeatherSource;

pub use auth::AuthService;
pub use comment::CommentService;
pub use manager::ManagerService;
pub use todo::TodoService;
pub use user::UserService;

/// Every service the route handlers need, shared as `web::Data<AppState>`.
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub todos: TodoService,
    pub managers: ManagerService,
    pub comments: CommentService,
}

/// The repository set a state is built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub managers: Arc<dyn ManagerRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            todos: Arc::new(PgTodoRepository::new(pool.clone())),
            managers: Arc::new(PgManagerRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool)),
        }
    }
}

impl AppState {
    pub fn new(repos: Repositories, weather: Arc<dyn WeatherSource>, keys: JwtKeys) -> Self {
        Self {
            auth: AuthService::new(repos.users.clone(), keys),
            users: UserService::new(repos.users.clone()),
            todos: TodoService::new(repos.todos.clone(), weather),
            managers: ManagerService::new(
                repos.managers.clone(),
                repos.users.clone(),
                repos.todos.clone(),
            ),
            comments: CommentService::new(repos.comments, repos.todos),
        }
    }
}
