use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::UserSummary;

/// A todo together with its owner.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Flat row shape of `todos JOIN users`.
#[derive(Debug, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            contents: row.contents,
            weather: row.weather,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Values needed to insert a todo. The owner is also registered as the first manager.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoSaveRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoSaveResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: todo.user,
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// `?page=&size=` for the todo listing. `page` is 1-based.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// One page of results.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 {
            total_elements / size + i64::from(total_elements % size != 0)
        } else {
            0
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}
