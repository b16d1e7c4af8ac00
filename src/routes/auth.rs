use crate::{
    auth::{SigninRequest, SignupRequest},
    error::AppError,
    services::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns a bearer token for it.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let response = state.auth.signup(signup_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Sign in
///
/// Checks the credentials and returns a fresh bearer token.
#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    signin_data: web::Json<SigninRequest>,
) -> Result<impl Responder, AppError> {
    signin_data.validate()?;
    let response = state.auth.signin(signin_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
