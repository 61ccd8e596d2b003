use bcrypt::{hash, verify, DEFAULT_COST};
use crate::dtos::user::{RegisterUserRequest, UserResponse, LoginRequest, LoginResponse};
use crate::auth::jwt::{issue_session_token, SESSION_TTL_HOURS};
use crate::auth::Role;
use crate::error::AppError;
use axum::{extract::State, Json};
use crate::state::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use axum::extract::Extension;

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(axum::http::StatusCode, Json<UserResponse>), AppError> {
    // Basic validation
    let Some(role) = Role::parse(&payload.role) else {
        return Err(AppError::validation("Invalid role"));
    };
    if payload.username.trim().is_empty() {
        return Err(AppError::validation("Username required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
        .bind(&payload.username)
        .bind(&password_hash)
        .bind(role.as_str())
        .execute(&state.db_pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Username already exists");
                }
            }
            AppError::db(e)
        })?;

    let user = fetch_user_by_username(&state, &payload.username).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            role,
            is_active: user.is_active,
            created_at: user.created_at,
        }),
    ))
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::validation("Username required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = fetch_user_by_username(&state, &payload.username).await?;

    if !user.is_active {
        return Err(AppError::conflict("User inactive"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::validation("Invalid credentials"));
    }

    let role = stored_role(&user)?;

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = issue_session_token(user.id, role, &user.username, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: (SESSION_TTL_HOURS * 60 * 60) as usize,
    }))
}

// Authenticated endpoint: returns the full profile for the session's user id
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role, is_active, created_at FROM users WHERE id = ?",
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    let role = stored_role(&user)?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        role,
        is_active: user.is_active,
        created_at: user.created_at,
    }))
}

fn stored_role(user: &User) -> Result<Role, AppError> {
    Role::parse(&user.role)
        .ok_or_else(|| AppError::internal(format!("Unknown role '{}' in user table", user.role)))
}

async fn fetch_user_by_username(state: &AppState, username: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role, is_active, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Invalid credentials"))
}
