use axum::{
    routing::{get, post},
    Router,
};
use crate::state::AppState;
use crate::handlers::gift_item;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gifts", get(gift_item::list_gift_items))
        .route("/gifts/save", post(gift_item::save_gift_items))
        .route_layer(axum::middleware::from_fn(require_auth))
}
