//! Admin-only endpoints. `AuthMiddleware` rejects non-admin callers on
//! `/api/admin/*`; both handlers here are wrapped in the admin access log.

use crate::{
    audit::AdminAccessLog, error::AppError, models::UserRoleChangeRequest, services::AppState,
};
use actix_web::{delete, patch, web, HttpResponse, Responder};
use validator::Validate;

#[patch(
    "/users/{user_id}",
    wrap = "AdminAccessLog::new(\"change_user_role\")"
)]
pub async fn change_user_role(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    role_data: web::Json<UserRoleChangeRequest>,
) -> Result<impl Responder, AppError> {
    role_data.validate()?;
    state
        .users
        .change_user_role(user_id.into_inner(), &role_data)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[delete(
    "/comments/{comment_id}",
    wrap = "AdminAccessLog::new(\"delete_comment\")"
)]
pub async fn delete_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.comments.delete_comment(comment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
