#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::Utc;

use todo_expert::auth::{AuthMiddleware, AuthUser, JwtKeys};
use todo_expert::models::{
    Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Todo, User, UserRole,
    EMAIL_ALREADY_EXISTS,
};
use todo_expert::repositories::{
    CommentRepository, ManagerRepository, TodoRepository, UserRepository,
};
use todo_expert::routes::{self, health};
use todo_expert::weather::WeatherSource;
use todo_expert::{AppError, AppState, Repositories};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "Password123";

#[derive(Default)]
struct Tables {
    user_seq: i64,
    todo_seq: i64,
    manager_seq: i64,
    comment_seq: i64,
    users: Vec<User>,
    todos: Vec<Todo>,
    managers: Vec<Manager>,
    comments: Vec<Comment>,
    manager_deletes: usize,
}

/// In-memory stand-in for all four repositories.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Inserts a user whose password is [`TEST_PASSWORD`], hashed at a low bcrypt cost.
    pub fn insert_user(&self, email: &str, role: UserRole) -> User {
        let password_hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();
        let mut tables = self.tables.lock().unwrap();
        tables.user_seq += 1;
        let now = Utc::now();
        let user = User {
            id: tables.user_seq,
            email: email.to_string(),
            password_hash,
            user_role: role,
            created_at: now,
            modified_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn managers(&self) -> Vec<Manager> {
        self.tables.lock().unwrap().managers.clone()
    }

    pub fn manager_deletes(&self) -> usize {
        self.tables.lock().unwrap().manager_deletes
    }

    pub fn todo_count(&self) -> usize {
        self.tables.lock().unwrap().todos.len()
    }

    pub fn comment_ids(&self) -> Vec<i64> {
        self.tables.lock().unwrap().comments.iter().map(|c| c.id).collect()
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn save(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        // Mirrors the UNIQUE constraint on users.email.
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::BadRequest(EMAIL_ALREADY_EXISTS.into()));
        }
        tables.user_seq += 1;
        let now = Utc::now();
        let saved = User {
            id: tables.user_seq,
            email: user.email,
            password_hash: user.password_hash,
            user_role: user.user_role,
            created_at: now,
            modified_at: now,
        };
        tables.users.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.email == email))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
            user.modified_at = Utc::now();
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.user_role = role;
            user.modified_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn save(&self, todo: NewTodo) -> Result<Todo, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.todo_seq += 1;
        tables.manager_seq += 1;
        let now = Utc::now();
        let saved = Todo {
            id: tables.todo_seq,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: todo.user.clone(),
            created_at: now,
            modified_at: now,
        };
        let owner_manager = Manager {
            id: tables.manager_seq,
            user: todo.user,
            todo_id: saved.id,
        };
        tables.todos.push(saved.clone());
        tables.managers.push(owner_manager);
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.todos.iter().find(|t| t.id == id).cloned())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<Todo>, i64), AppError> {
        let tables = self.tables.lock().unwrap();
        let mut todos = tables.todos.clone();
        todos.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = todos.len() as i64;
        let page = todos
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl ManagerRepository for MemoryStore {
    async fn save(&self, manager: NewManager) -> Result<Manager, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.manager_seq += 1;
        let saved = Manager {
            id: tables.manager_seq,
            user: manager.user,
            todo_id: manager.todo_id,
        };
        tables.managers.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.managers.iter().find(|m| m.id == id).cloned())
    }

    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Manager>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .managers
            .iter()
            .filter(|m| m.todo_id == todo_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, manager: &Manager) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.managers.retain(|m| m.id != manager.id);
        tables.manager_deletes += 1;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn save(&self, comment: NewComment) -> Result<Comment, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.comment_seq += 1;
        let now = Utc::now();
        let saved = Comment {
            id: tables.comment_seq,
            contents: comment.contents,
            user: comment.user,
            todo_id: comment.todo_id,
            created_at: now,
            modified_at: now,
        };
        tables.comments.push(saved.clone());
        Ok(saved)
    }

    async fn find_all_by_todo_id(&self, todo_id: i64) -> Result<Vec<Comment>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.todo_id == todo_id)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.comments.retain(|c| c.id != id);
        Ok(())
    }
}

/// Weather source whose answer can be changed between calls.
pub struct FixedWeather {
    weather: Mutex<Result<String, AppError>>,
    calls: AtomicUsize,
}

impl FixedWeather {
    pub fn new(weather: &str) -> Self {
        Self {
            weather: Mutex::new(Ok(weather.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, weather: &str) {
        *self.weather.lock().unwrap() = Ok(weather.to_string());
    }

    pub fn fail_with(&self, error: AppError) {
        *self.weather.lock().unwrap() = Err(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn today_weather(&self) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.weather.lock().unwrap().clone()
    }
}

/// A fully wired application over [`MemoryStore`] and [`FixedWeather`].
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub weather: Arc<FixedWeather>,
    pub keys: JwtKeys,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let weather = Arc::new(FixedWeather::new("Sunny"));
        let keys = JwtKeys::new(TEST_SECRET, 60);
        let repos = Repositories {
            users: store.clone(),
            todos: store.clone(),
            managers: store.clone(),
            comments: store.clone(),
        };
        let state = web::Data::new(AppState::new(repos, weather.clone(), keys.clone()));
        Self {
            store,
            weather,
            keys,
            state,
        }
    }

    pub fn auth_user(user: &User) -> AuthUser {
        AuthUser::new(user.id, user.email.clone(), user.user_role)
    }

    /// `Bearer <jwt>` for the given user.
    pub fn bearer(&self, user: &User) -> String {
        self.keys
            .create_token(user.id, &user.email, user.user_role)
            .unwrap()
    }
}

/// Builds the same app as `main.rs`, minus the database.
pub async fn init_app(
    state: web::Data<AppState>,
    keys: JwtKeys,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::Data::new(keys))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}
