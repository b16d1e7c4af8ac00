use crate::error::AppError;
use crate::models::UserRole;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's id, as a string.
    pub sub: String,
    pub email: String,
    pub user_role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl Claims {
    /// The subject parsed back into a user id.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".into()))
    }
}

/// Signing and verification keys plus token lifetime.
///
/// Registered as `web::Data<JwtKeys>` so both the auth middleware and the admin
/// access log can decode tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issues a signed HS256 token and returns it with the `Bearer ` prefix,
    /// ready to be sent back as the `Authorization` header value.
    pub fn create_token(&self, user_id: i64, email: &str, role: UserRole) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::minutes(self.ttl_minutes))
            .ok_or_else(|| AppError::InternalServerError("Invalid token lifetime".into()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            user_role: role,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))?;
        Ok(format!("{}{}", BEARER_PREFIX, token))
    }

    /// Strips the `Bearer ` prefix from an `Authorization` header value.
    pub fn substring_token<'a>(&self, header_value: &'a str) -> Result<&'a str, AppError> {
        header_value
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Token not found".into()))
    }

    /// Verifies signature and expiry, returning the decoded claims.
    pub fn extract_claims(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}
