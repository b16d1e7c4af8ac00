pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, JwtKeys, BEARER_PREFIX};

/// Payload for `POST /api/auth/signup`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// `USER` or `ADMIN`, case-insensitive.
    pub user_role: String,
}

/// Payload for `POST /api/auth/signin`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response after signup or signin: the `Bearer `-prefixed token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub bearer_token: String,
}
