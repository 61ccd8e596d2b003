use axum::extract::{Query, State};
use tracing::instrument;

use crate::calendar;
use crate::dtos::daily_record::SliceParams;
use crate::error::AppError;
use crate::handlers::daily_record::{fetch_slice, resolve_slice};
use crate::models::daily_record::DailyRecord;
use crate::state::AppState;

// GET /prompt - fixed-format text block for pasting into an external AI chat
#[instrument(skip(state))]
pub async fn build_prompt(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> Result<String, AppError> {
    let (from, to) = resolve_slice(&params, state.managed_year)?;
    let rows = fetch_slice(&state.db_pool, from, to).await?;
    Ok(render_prompt(from, to, &rows))
}

pub(crate) fn render_prompt(
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    rows: &[DailyRecord],
) -> String {
    let mut out = format!(
        "你是連鎖咖啡門市的營運分析顧問。以下是本店 {from} ~ {to} 的每日營運數據，\
         請分析營收趨勢、達成率與人力效率，指出表現異常的日期，並提出三點具體改善建議。\n\n"
    );
    for r in rows {
        out.push_str(&format!(
            "{} {}：目標 {:.0}、實際 {:.0}、達成率 {:.1}%、來客 {}、客單價 {:.0}、\
             外送 {:.0}、工時 {:.1}、工時貢獻 {:.0}",
            r.record_date,
            calendar::day_label(r.record_date),
            r.target_revenue,
            r.actual_revenue,
            r.achievement_rate,
            r.customer_count,
            r.average_ticket,
            r.delivery_ubereats + r.delivery_foodpanda,
            r.labor_hours,
            r.labor_contribution,
        ));
        if !r.note.is_empty() {
            out.push_str(&format!("、備註：{}", r.note));
        }
        let event = calendar::marketing_event(r.record_date);
        if !event.is_empty() {
            out.push_str(&format!("、活動:{event}"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn prompt_has_one_line_per_date_plus_instructions() {
        let row = DailyRecord {
            record_date: date(2025, 5, 1),
            target_revenue: 10_000.0,
            actual_revenue: 12_000.0,
            achievement_rate: 120.0,
            customer_count: 120,
            average_ticket: 100.0,
            pastry_revenue: 0.0,
            pastry_units: 0,
            pastry_waste_units: 0,
            retail_revenue: 0.0,
            ncb_count: 0,
            baf_count: 0,
            festival_units: 0,
            delivery_ubereats: 800.0,
            delivery_foodpanda: 200.0,
            labor_hours: 8.0,
            labor_contribution: 1500.0,
            note: "連假首日".to_string(),
        };

        let text = render_prompt(date(2025, 5, 1), date(2025, 5, 1), &[row]);
        assert!(text.starts_with("你是連鎖咖啡門市的營運分析顧問"));
        assert!(text.contains("2025-05-01"));
        assert!(text.contains("達成率 120.0%"));
        assert!(text.contains("備註：連假首日"));
        // 2025-05-01 carries a marketing campaign in the fixed calendar.
        assert!(text.contains("活動:全品項第二杯半價"));
        assert_eq!(text.lines().count(), 3);
    }
}
