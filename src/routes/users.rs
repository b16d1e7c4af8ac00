use crate::{
    auth::AuthUser, error::AppError, models::ChangePasswordRequest, services::AppState,
};
use actix_web::{get, put, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves a user's public profile (`id`, `email`).
#[get("/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user = state.users.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Changes the caller's own password.
///
/// ## Responses:
/// - `200 OK` on success.
/// - `400 Bad Request` if the old password is wrong or equals the new one.
/// - `422 Unprocessable Entity` if the new password is too weak.
#[put("")]
pub async fn change_password(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    password_data: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    password_data.validate()?;
    state
        .users
        .change_password(auth_user.id, &password_data)
        .await?;
    Ok(HttpResponse::Ok().finish())
}
