use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::{prompt, summary};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary::slice_summary))
        .route("/prompt", get(prompt::build_prompt))
        .route_layer(axum::middleware::from_fn(require_auth))
}
