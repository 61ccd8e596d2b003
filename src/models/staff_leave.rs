use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// One row per staff member. Leave cycles are stored as typed start/end
/// dates; a missing end date means the cycle is unknown and is skipped by
/// the expiry scan.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StaffLeave {
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub annual_cycle_start: Option<NaiveDate>,
    pub annual_cycle_end: Option<NaiveDate>,
    pub annual_hours_left: f64,
    pub comp_cycle_start: Option<NaiveDate>,
    pub comp_cycle_end: Option<NaiveDate>,
    pub comp_hours_left: f64,
    pub special_name: Option<String>,
    pub special_cycle_start: Option<NaiveDate>,
    pub special_cycle_end: Option<NaiveDate>,
    pub special_hours_left: f64,
}
