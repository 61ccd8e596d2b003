pub mod daily_records;
pub mod gift_items;
pub mod staff_leaves;
pub mod summary;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(daily_records::routes())
        .merge(gift_items::routes())
        .merge(staff_leaves::routes())
        .merge(summary::routes())
}
