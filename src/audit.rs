//! Admin access log.
//!
//! [`AdminAccessLog`] wraps individual admin resources and writes one INFO
//! record (target `todo_expert::audit`) before the handler runs:
//!
//! ```text
//! Admin Access Log - User ID: 1, Request Time: 2024-06-01T10:00:00, Request URL: /api/admin/comments/3, Method: delete_comment
//! ```

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error,
};
use chrono::{Local, NaiveDateTime};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::JwtKeys;
use crate::error::AppError;

/// What gets logged for one admin call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccessEntry {
    pub user_id: String,
    pub request_time: NaiveDateTime,
    pub request_url: String,
    pub method: &'static str,
}

impl AdminAccessEntry {
    /// Reads the caller's subject claim from the `Authorization` header.
    pub fn from_request(req: &ServiceRequest, method: &'static str) -> Result<Self, AppError> {
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

        Ok(Self {
            user_id: claims.sub,
            request_time: Local::now().naive_local(),
            request_url: req.uri().path().to_string(),
            method,
        })
    }

    pub fn log(&self) {
        log::info!(
            target: "todo_expert::audit",
            "Admin Access Log - User ID: {}, Request Time: {}, Request URL: {}, Method: {}",
            self.user_id,
            self.request_time.format("%Y-%m-%dT%H:%M:%S%.3f"),
            self.request_url,
            self.method
        );
    }
}

/// Logs an [`AdminAccessEntry`] before the wrapped resource executes.
///
/// `method` names the operation being invoked, e.g. `"delete_comment"`.
pub struct AdminAccessLog {
    method: &'static str,
}

impl AdminAccessLog {
    pub fn new(method: &'static str) -> Self {
        Self { method }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AdminAccessLogService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAccessLogService {
            service,
            method: self.method,
        }))
    }
}

pub struct AdminAccessLogService<S> {
    service: S,
    method: &'static str,
}

impl<S, B> Service<ServiceRequest> for AdminAccessLogService<S>
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
        match AdminAccessEntry::from_request(&req, self.method) {
            Ok(entry) => {
                entry.log();
                Box::pin(self.service.call(req))
            }
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}
