use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{Claims, JwtKeys};
use crate::error::AppError;
use crate::models::UserRole;

/// Paths reachable without a token.
fn is_public(path: &str) -> bool {
    path == "/health" || path.starts_with("/api/auth/")
}

fn is_admin_only(path: &str) -> bool {
    path.starts_with("/api/admin/") || path == "/api/admin"
}

/// Verifies the bearer token on every non-public request and stores the
/// decoded [`Claims`] in the request extensions.
///
/// `/api/admin/*` additionally requires the `ADMIN` role. The signing keys are
/// read from `web::Data<JwtKeys>` app data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S> AuthMiddlewareService<S> {
    fn authorize(req: &ServiceRequest) -> Result<Claims, AppError> {
        let keys = req
            .app_data::<web::Data<JwtKeys>>()
            .ok_or_else(|| AppError::InternalServerError("JWT keys are not configured".into()))?;

        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

        let token = keys.substring_token(header_value)?;
        let claims = keys.extract_claims(token)?;

        if is_admin_only(req.path()) && claims.user_role != UserRole::Admin {
            log::warn!(
                "Rejected non-admin user {} on {}",
                claims.sub,
                req.path()
            );
            return Err(AppError::Forbidden("Admin access required".into()));
        }
        Ok(claims)
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.path()) {
            return Box::pin(self.service.call(req));
        }

        match Self::authorize(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}
