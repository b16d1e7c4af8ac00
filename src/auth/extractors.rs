use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::{UserRole, UserSummary};

/// The authenticated caller, projected from the token claims that
/// `AuthMiddleware` stored in the request extensions. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn new(id: i64, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

impl TryFrom<&Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email.clone(),
            role: claims.user_role,
        })
    }
}

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => AuthUser::try_from(claims),
            // AuthMiddleware did not run on this route.
            None => Err(AppError::Unauthorized(
                "Authenticated user not found in request".to_string(),
            )),
        };
        ready(result.map_err(Into::into))
    }
}
