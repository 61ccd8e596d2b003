use axum::{
    routing::{get, post},
    Router,
};
use crate::state::AppState;
use crate::handlers::daily_record;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(daily_record::list_records))
        .route("/records/save", post(daily_record::save_records))
        .route("/records/export", get(daily_record::export_records))
        .route_layer(axum::middleware::from_fn(require_auth))
}
