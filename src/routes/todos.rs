use crate::{
    auth::AuthUser,
    error::AppError,
    models::{CommentSaveRequest, ManagerSaveRequest, PageQuery, TodoSaveRequest},
    services::AppState,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Creates a new todo for the authenticated user.
///
/// The current weather is fetched and stored with the todo, and the caller is
/// registered as its first manager.
///
/// ## Responses:
/// - `200 OK`: `{id, title, contents, weather, user}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: blank title or contents.
/// - `500 Internal Server Error`: the weather source failed.
#[post("")]
pub async fn save_todo(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    todo_data: web::Json<TodoSaveRequest>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;
    let response = state
        .todos
        .save_todo(&auth_user, todo_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Lists todos, most recently modified first.
///
/// ## Query Parameters:
/// - `page` (optional, 1-based, default 1)
/// - `size` (optional, default 10)
#[get("")]
pub async fn get_todos(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let page = state.todos.get_todos(query.page, query.size).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{todo_id}")]
pub async fn get_todo(
    state: web::Data<AppState>,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let todo = state.todos.get_todo(todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Assigns a user as manager of a todo. Only the todo's creator may do this.
#[post("/{todo_id}/managers")]
pub async fn save_manager(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    todo_id: web::Path<i64>,
    manager_data: web::Json<ManagerSaveRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .managers
        .save_manager(&auth_user, todo_id.into_inner(), &manager_data)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{todo_id}/managers")]
pub async fn get_managers(
    state: web::Data<AppState>,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let managers = state.managers.get_managers(todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(managers))
}

/// Removes a manager from a todo the caller created.
///
/// ## Responses:
/// - `200 OK` on deletion.
/// - `400 Bad Request`: todo not found, caller is not the creator, manager not
///   found, or the manager belongs to another todo.
#[delete("/{todo_id}/managers/{manager_id}")]
pub async fn delete_manager(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    path: web::Path<(i64, i64)>,
) -> Result<impl Responder, AppError> {
    let (todo_id, manager_id) = path.into_inner();
    state
        .managers
        .delete_manager(&auth_user, todo_id, manager_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[post("/{todo_id}/comments")]
pub async fn save_comment(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    todo_id: web::Path<i64>,
    comment_data: web::Json<CommentSaveRequest>,
) -> Result<impl Responder, AppError> {
    comment_data.validate()?;
    let response = state
        .comments
        .save_comment(&auth_user, todo_id.into_inner(), comment_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{todo_id}/comments")]
pub async fn get_comments(
    state: web::Data<AppState>,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let comments = state.comments.get_comments(todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
