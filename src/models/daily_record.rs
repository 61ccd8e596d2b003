use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// One row per calendar date of the managed year. `achievement_rate`,
/// `average_ticket` and `labor_contribution` are derived and recomputed on
/// every save.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyRecord {
    pub record_date: NaiveDate,
    pub target_revenue: f64,
    pub actual_revenue: f64,
    pub achievement_rate: f64,
    pub customer_count: i64,
    pub average_ticket: f64,
    pub pastry_revenue: f64,
    pub pastry_units: i64,
    pub pastry_waste_units: i64,
    pub retail_revenue: f64,
    pub ncb_count: i64,
    pub baf_count: i64,
    pub festival_units: i64,
    pub delivery_ubereats: f64,
    pub delivery_foodpanda: f64,
    pub labor_hours: f64,
    pub labor_contribution: f64,
    pub note: String,
}
