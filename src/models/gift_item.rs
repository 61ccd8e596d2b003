use serde::Serialize;
use sqlx::FromRow;

/// Gift/inventory control row. Unlike daily records the row count is
/// dynamic; the whole set is replaced on save.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GiftItem {
    pub id: i64,
    pub campaign: String,
    pub item_name: String,
    pub allocated: f64,
    pub remaining: f64,
    pub sell_through_rate: f64,
}
