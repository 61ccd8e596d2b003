use axum::extract::{Query, State};
use axum::Json;
use tracing::instrument;

use crate::dtos::daily_record::SliceParams;
use crate::dtos::summary::SliceSummary;
use crate::error::AppError;
use crate::handlers::daily_record::{fetch_slice, resolve_slice};
use crate::metrics;
use crate::models::daily_record::DailyRecord;
use crate::state::AppState;

// GET /summary - headline numbers for one calendar slice
#[instrument(skip(state))]
pub async fn slice_summary(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> Result<Json<SliceSummary>, AppError> {
    let (from, to) = resolve_slice(&params, state.managed_year)?;
    let rows = fetch_slice(&state.db_pool, from, to).await?;
    Ok(Json(summarize(from, to, &rows)))
}

/// Ratio fields come from the slice totals, not from averaging the per-day
/// ratios, so a strong day weighs in proportion to its revenue.
pub(crate) fn summarize(
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    rows: &[DailyRecord],
) -> SliceSummary {
    let total_target: f64 = rows.iter().map(|r| r.target_revenue).sum();
    let total_actual: f64 = rows.iter().map(|r| r.actual_revenue).sum();
    let total_customers: i64 = rows.iter().map(|r| r.customer_count).sum();
    let total_labor_hours: f64 = rows.iter().map(|r| r.labor_hours).sum();

    SliceSummary {
        from,
        to,
        days: rows.len(),
        total_target_revenue: total_target,
        total_actual_revenue: total_actual,
        achievement_rate: metrics::achievement_rate(total_actual, total_target),
        total_customer_count: total_customers,
        average_ticket: metrics::average_ticket(total_actual, total_customers),
        total_pastry_revenue: rows.iter().map(|r| r.pastry_revenue).sum(),
        total_pastry_units: rows.iter().map(|r| r.pastry_units).sum(),
        total_pastry_waste_units: rows.iter().map(|r| r.pastry_waste_units).sum(),
        total_retail_revenue: rows.iter().map(|r| r.retail_revenue).sum(),
        total_delivery_revenue: rows
            .iter()
            .map(|r| r.delivery_ubereats + r.delivery_foodpanda)
            .sum(),
        total_labor_hours,
        labor_contribution: metrics::labor_contribution(total_actual, total_labor_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(day: u32, target: f64, actual: f64, customers: i64, hours: f64) -> DailyRecord {
        DailyRecord {
            record_date: date(2025, 8, day),
            target_revenue: target,
            actual_revenue: actual,
            achievement_rate: 0.0,
            customer_count: customers,
            average_ticket: 0.0,
            pastry_revenue: 0.0,
            pastry_units: 0,
            pastry_waste_units: 0,
            retail_revenue: 0.0,
            ncb_count: 0,
            baf_count: 0,
            festival_units: 0,
            delivery_ubereats: 100.0,
            delivery_foodpanda: 50.0,
            labor_hours: hours,
            labor_contribution: 0.0,
            note: String::new(),
        }
    }

    #[test]
    fn ratios_come_from_totals() {
        let rows = vec![
            record(1, 10_000.0, 12_000.0, 120, 8.0),
            record(2, 10_000.0, 8_000.0, 80, 8.0),
        ];
        let summary = summarize(date(2025, 8, 1), date(2025, 8, 2), &rows);

        assert_eq!(summary.days, 2);
        assert_eq!(summary.total_target_revenue, 20_000.0);
        assert_eq!(summary.total_actual_revenue, 20_000.0);
        assert_eq!(summary.achievement_rate, 100.0);
        assert_eq!(summary.total_customer_count, 200);
        assert_eq!(summary.average_ticket, 100.0);
        assert_eq!(summary.total_delivery_revenue, 300.0);
        assert_eq!(summary.labor_contribution, 1250.0);
    }

    #[test]
    fn empty_slice_summarizes_to_zeros() {
        let summary = summarize(date(2025, 8, 1), date(2025, 8, 31), &[]);
        assert_eq!(summary.days, 0);
        assert_eq!(summary.achievement_rate, 0.0);
        assert_eq!(summary.average_ticket, 0.0);
        assert_eq!(summary.labor_contribution, 0.0);
    }
}
