use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::jwt::verify_session_token;
use crate::auth::Role;

/// Request-scoped session context. The role gates which columns a save may
/// touch; there is no process-wide session state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: Role,
    pub username: String,
}

pub async fn require_auth(mut req: Request<Body>, next: Next) -> Response {
    let Some(token) = bearer_token(&req) else {
        return unauthorized("Missing or malformed Authorization header");
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return unauthorized("Server auth misconfiguration"),
    };

    let claims = match verify_session_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
        username: claims.username,
    });

    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(json!({ "error": msg, "code": "unauthorized" }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}
