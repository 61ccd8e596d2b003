use axum::{
    routing::{get, post},
    Router,
};
use crate::state::AppState;
use crate::handlers::staff_leave;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaves", get(staff_leave::list_staff_leaves))
        .route("/leaves/save", post(staff_leave::save_staff_leaves))
        .route("/leaves/expiring", get(staff_leave::expiring_leaves))
        .route_layer(axum::middleware::from_fn(require_auth))
}
