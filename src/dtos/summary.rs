use chrono::NaiveDate;
use serde::Serialize;

/// Headline numbers over one calendar slice. Ratio fields are recomputed
/// from the slice totals, not averaged across days.
#[derive(Debug, Serialize)]
pub struct SliceSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: usize,
    pub total_target_revenue: f64,
    pub total_actual_revenue: f64,
    pub achievement_rate: f64,
    pub total_customer_count: i64,
    pub average_ticket: f64,
    pub total_pastry_revenue: f64,
    pub total_pastry_units: i64,
    pub total_pastry_waste_units: i64,
    pub total_retail_revenue: f64,
    pub total_delivery_revenue: f64,
    pub total_labor_hours: f64,
    pub labor_contribution: f64,
}
