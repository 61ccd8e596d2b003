use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::AppError;

/// Sessions last one shift.
pub const SESSION_TTL_HOURS: i64 = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    fn new(user_id: i64, role: Role, username: &str) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(SESSION_TTL_HOURS);
        Self {
            sub: user_id,
            role,
            username: username.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

pub fn issue_session_token(
    user_id: i64,
    role: Role,
    username: &str,
    secret: &str,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, username);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::validation(format!("Invalid or expired token: {e}")))
}
