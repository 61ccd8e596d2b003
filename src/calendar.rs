// src/calendar.rs
//
// Display annotations for the daily record grid: weekday + holiday/weekend
// label and the day's marketing event. Both are static table lookups keyed by
// the exact date string, mirroring the store's marketing calendar.

use chrono::{Datelike, FixedOffset, NaiveDate, Utc, Weekday};

/// Year the holiday and marketing tables below are keyed to. The managed
/// year defaults to this; dates outside it get plain weekday labels and no
/// events.
pub const CALENDAR_YEAR: i32 = 2025;

/// National holidays for the managed year, exact dates.
const HOLIDAYS: &[(&str, &str)] = &[
    ("2025-01-01", "元旦"),
    ("2025-01-27", "春節調整放假"),
    ("2025-01-28", "除夕"),
    ("2025-01-29", "春節初一"),
    ("2025-01-30", "春節初二"),
    ("2025-01-31", "春節初三"),
    ("2025-02-28", "和平紀念日"),
    ("2025-04-03", "兒童節補假"),
    ("2025-04-04", "兒童節/清明節"),
    ("2025-05-01", "勞動節"),
    ("2025-05-30", "端午節補假"),
    ("2025-05-31", "端午節"),
    ("2025-09-28", "教師節"),
    ("2025-09-29", "教師節補假"),
    ("2025-10-06", "中秋節"),
    ("2025-10-10", "國慶日"),
    ("2025-10-24", "光復節補假"),
    ("2025-10-25", "光復節"),
    ("2025-12-25", "行憲紀念日"),
];

/// Marketing calendar, exact dates. Empty for dates with no campaign.
const MARKETING_EVENTS: &[(&str, &str)] = &[
    ("2025-01-01", "新年限定飲品上市"),
    ("2025-02-14", "情人節甜點買一送一"),
    ("2025-03-01", "春季新品上市"),
    ("2025-05-01", "全品項第二杯半價"),
    ("2025-06-21", "夏至冰飲日"),
    ("2025-09-01", "中秋禮盒預購開跑"),
    ("2025-10-01", "週年慶會員雙倍點數"),
    ("2025-11-11", "雙11咖啡豆優惠"),
    ("2025-12-24", "聖誕限定套餐"),
];

const WEEKDAY_NAMES: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Weekday abbreviation plus holiday name, or a weekend marker when the date
/// is an ordinary Saturday/Sunday, or the plain weekday otherwise.
pub fn day_label(date: NaiveDate) -> String {
    let key = date.format("%Y-%m-%d").to_string();
    let weekday = weekday_name(date.weekday());
    if let Some((_, holiday)) = HOLIDAYS.iter().find(|(d, _)| *d == key) {
        return format!("({weekday}) {holiday}");
    }
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return format!("({weekday}) 週末");
    }
    format!("({weekday})")
}

/// The day's marketing campaign, empty string when there is none.
pub fn marketing_event(date: NaiveDate) -> String {
    let key = date.format("%Y-%m-%d").to_string();
    MARKETING_EVENTS
        .iter()
        .find(|(d, _)| *d == key)
        .map(|(_, event)| (*event).to_string())
        .unwrap_or_default()
}

/// Wall-clock "today" in the store's fixed UTC+8 offset.
pub fn today_taipei() -> NaiveDate {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    Utc::now().with_timezone(&offset).date_naive()
}

pub fn current_month_taipei() -> u32 {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    Utc::now().with_timezone(&offset).month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn holiday_label_includes_holiday_name() {
        // 2025-05-31 is a Saturday and the Dragon Boat Festival.
        assert_eq!(day_label(date(2025, 5, 31)), "(六) 端午節");
        // Holiday on a weekday.
        assert_eq!(day_label(date(2025, 10, 10)), "(五) 國慶日");
    }

    #[test]
    fn plain_weekend_gets_weekend_marker() {
        // 2025-03-08 is an ordinary Saturday.
        assert_eq!(day_label(date(2025, 3, 8)), "(六) 週末");
        assert_eq!(day_label(date(2025, 3, 9)), "(日) 週末");
    }

    #[test]
    fn plain_weekday_is_just_the_weekday() {
        // 2025-03-10 is a Monday.
        assert_eq!(day_label(date(2025, 3, 10)), "(一)");
    }

    #[test]
    fn marketing_event_lookup_is_exact_date() {
        assert_eq!(marketing_event(date(2025, 5, 1)), "全品項第二杯半價");
        assert_eq!(marketing_event(date(2025, 5, 2)), "");
    }
}
