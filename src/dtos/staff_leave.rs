use chrono::NaiveDate;
use serde::Deserialize;

/// One staff row as submitted. Each leave cycle may arrive as typed
/// start/end dates or as a legacy `"YYYYMMDD~YYYYMMDD"` range string; typed
/// fields win when both are present.
#[derive(Debug, Deserialize)]
pub struct StaffLeaveRow {
    pub name: String,
    #[serde(default)]
    pub grade: String,
    pub annual_cycle: Option<String>,
    pub annual_cycle_start: Option<NaiveDate>,
    pub annual_cycle_end: Option<NaiveDate>,
    #[serde(default)]
    pub annual_hours_left: f64,
    pub comp_cycle: Option<String>,
    pub comp_cycle_start: Option<NaiveDate>,
    pub comp_cycle_end: Option<NaiveDate>,
    #[serde(default)]
    pub comp_hours_left: f64,
    pub special_name: Option<String>,
    pub special_cycle: Option<String>,
    pub special_cycle_start: Option<NaiveDate>,
    pub special_cycle_end: Option<NaiveDate>,
    #[serde(default)]
    pub special_hours_left: f64,
}

impl StaffLeaveRow {
    /// Resolve one cycle to typed dates, falling back to the legacy range
    /// string. Malformed strings resolve to no cycle.
    pub fn resolve_cycle(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        legacy: Option<&str>,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        if start.is_some() || end.is_some() {
            return (start, end);
        }
        match legacy.and_then(crate::leave::parse_cycle) {
            Some((s, e)) => (Some(s), Some(e)),
            None => (None, None),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveStaffLeavesRequest {
    pub rows: Vec<StaffLeaveRow>,
}
