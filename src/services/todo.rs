use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{NewTodo, Page, Todo, TodoResponse, TodoSaveRequest, TodoSaveResponse};
use crate::repositories::TodoRepository;
use crate::weather::WeatherSource;

pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    weather: Arc<dyn WeatherSource>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { todos, weather }
    }

    /// Creates a todo owned by `auth_user`, stamped with the weather reported
    /// by the weather source at call time.
    pub async fn save_todo(
        &self,
        auth_user: &AuthUser,
        request: TodoSaveRequest,
    ) -> Result<TodoSaveResponse, AppError> {
        let weather = self.weather.today_weather().await?;

        let saved = self
            .todos
            .save(NewTodo {
                title: request.title,
                contents: request.contents,
                weather,
                user: auth_user.summary(),
            })
            .await?;
        log::debug!("User {} created todo {}", auth_user.id, saved.id);

        Ok(TodoSaveResponse {
            id: saved.id,
            title: saved.title,
            contents: saved.contents,
            weather: saved.weather,
            user: saved.user,
        })
    }

    pub async fn get_todos(&self, page: i64, size: i64) -> Result<Page<TodoResponse>, AppError> {
        if page < 1 || size < 1 {
            return Err(AppError::BadRequest(
                "Page and size must be greater than zero".into(),
            ));
        }

        let offset = (page - 1)
            .checked_mul(size)
            .ok_or_else(|| AppError::BadRequest("Page is out of range".into()))?;

        let (todos, total) = self.todos.find_page(offset, size).await?;
        let content = todos.into_iter().map(TodoResponse::from).collect();
        Ok(Page::new(content, page, size, total))
    }

    pub async fn get_todo(&self, todo_id: i64) -> Result<TodoResponse, AppError> {
        Ok(self.find_todo(todo_id).await?.into())
    }

    async fn find_todo(&self, todo_id: i64) -> Result<Todo, AppError> {
        self.todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Todo not found".into()))
    }
}
