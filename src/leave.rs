// src/leave.rs
//
// Leave-cycle expiry scan. Cycles are stored as typed start/end dates; the
// legacy `"YYYYMMDD~YYYYMMDD"` range string is still accepted on import and
// parsed once here at the boundary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::staff_leave::StaffLeave;

/// Days of look-ahead before a cycle end is worth warning about.
pub const EXPIRY_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaveWarning {
    pub staff_name: String,
    pub leave_type: String,
    pub cycle_end: NaiveDate,
    pub days_left: i64,
    pub hours_left: f64,
}

/// Parse a legacy `"YYYYMMDD~YYYYMMDD"` cycle range. Malformed input yields
/// None ("no cycle"), never an error.
pub fn parse_cycle(cycle: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = cycle.split_once('~')?;
    let start = NaiveDate::parse_from_str(start.trim(), "%Y%m%d").ok()?;
    let end = NaiveDate::parse_from_str(end.trim(), "%Y%m%d").ok()?;
    Some((start, end))
}

/// Warnings for every leave balance whose cycle ends within the look-ahead
/// window and still has unused hours. Cycles without an end date are skipped.
pub fn expiring_warnings(records: &[StaffLeave], today: NaiveDate) -> Vec<LeaveWarning> {
    let mut warnings = Vec::new();
    for record in records {
        push_warning(
            &mut warnings,
            &record.name,
            "特休",
            record.annual_cycle_end,
            record.annual_hours_left,
            today,
        );
        push_warning(
            &mut warnings,
            &record.name,
            "補休",
            record.comp_cycle_end,
            record.comp_hours_left,
            today,
        );
        if let Some(special) = &record.special_name {
            push_warning(
                &mut warnings,
                &record.name,
                special,
                record.special_cycle_end,
                record.special_hours_left,
                today,
            );
        }
    }
    warnings
}

fn push_warning(
    warnings: &mut Vec<LeaveWarning>,
    staff_name: &str,
    leave_type: &str,
    cycle_end: Option<NaiveDate>,
    hours_left: f64,
    today: NaiveDate,
) {
    let Some(end) = cycle_end else { return };
    let days_left = (end - today).num_days();
    if (0..=EXPIRY_WINDOW_DAYS).contains(&days_left) && hours_left > 0.0 {
        warnings.push(LeaveWarning {
            staff_name: staff_name.to_string(),
            leave_type: leave_type.to_string(),
            cycle_end: end,
            days_left,
            hours_left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn staff(name: &str, annual_end: Option<NaiveDate>, annual_hours: f64) -> StaffLeave {
        StaffLeave {
            id: 1,
            name: name.to_string(),
            grade: "正職".to_string(),
            annual_cycle_start: Some(date(2025, 7, 6)),
            annual_cycle_end: annual_end,
            annual_hours_left: annual_hours,
            comp_cycle_start: None,
            comp_cycle_end: None,
            comp_hours_left: 0.0,
            special_name: None,
            special_cycle_start: None,
            special_cycle_end: None,
            special_hours_left: 0.0,
        }
    }

    #[test]
    fn parses_legacy_cycle_range() {
        let (start, end) = parse_cycle("20250706~20260105").unwrap();
        assert_eq!(start, date(2025, 7, 6));
        assert_eq!(end, date(2026, 1, 5));
    }

    #[test]
    fn malformed_cycle_yields_none() {
        assert!(parse_cycle("").is_none());
        assert!(parse_cycle("20250706").is_none());
        assert!(parse_cycle("20250706~").is_none());
        assert!(parse_cycle("2025-07-06~2026-01-05").is_none());
        assert!(parse_cycle("not a cycle").is_none());
    }

    #[test]
    fn warns_on_cycle_ending_within_window_with_hours_left() {
        let (_, end) = parse_cycle("20250706~20260105").unwrap();
        let records = vec![staff("王小明", Some(end), 4.0)];
        let warnings = expiring_warnings(&records, date(2025, 12, 1));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].leave_type, "特休");
        assert_eq!(warnings[0].days_left, 35);
        assert_eq!(warnings[0].hours_left, 4.0);
    }

    #[test]
    fn zero_balance_emits_no_warning() {
        let records = vec![staff("王小明", Some(date(2026, 1, 5)), 0.0)];
        assert!(expiring_warnings(&records, date(2025, 12, 1)).is_empty());
    }

    #[test]
    fn already_expired_cycle_emits_no_warning() {
        let records = vec![staff("王小明", Some(date(2025, 11, 30)), 8.0)];
        assert!(expiring_warnings(&records, date(2025, 12, 1)).is_empty());
    }

    #[test]
    fn cycle_beyond_window_emits_no_warning() {
        let records = vec![staff("王小明", Some(date(2026, 6, 1)), 8.0)];
        assert!(expiring_warnings(&records, date(2025, 12, 1)).is_empty());
    }

    #[test]
    fn missing_end_date_is_silently_skipped() {
        let records = vec![staff("王小明", None, 8.0)];
        assert!(expiring_warnings(&records, date(2025, 12, 1)).is_empty());
    }

    #[test]
    fn special_leave_is_scanned_under_its_own_name() {
        let mut record = staff("李大華", None, 0.0);
        record.special_name = Some("生日假".to_string());
        record.special_cycle_end = Some(date(2025, 12, 31));
        record.special_hours_left = 8.0;
        let warnings = expiring_warnings(&[record], date(2025, 12, 1));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].leave_type, "生日假");
        assert_eq!(warnings[0].days_left, 30);
    }
}
