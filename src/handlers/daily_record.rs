use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::auth::Role;
use crate::calendar;
use crate::dtos::daily_record::{
    DailyRecordResponse, RecordEdit, SaveRecordsRequest, SaveRecordsResponse, SliceParams,
};
use crate::error::AppError;
use crate::metrics;
use crate::middleware::auth::AuthContext;
use crate::models::daily_record::DailyRecord;
use crate::state::AppState;

pub(crate) const RECORD_COLUMNS: &str = "record_date, target_revenue, actual_revenue, \
    achievement_rate, customer_count, average_ticket, pastry_revenue, pastry_units, \
    pastry_waste_units, retail_revenue, ncb_count, baf_count, festival_units, \
    delivery_ubereats, delivery_foodpanda, labor_hours, labor_contribution, note";

// GET /records - one calendar slice of the grid, with day labels
#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> Result<Json<Vec<DailyRecordResponse>>, AppError> {
    let (from, to) = resolve_slice(&params, state.managed_year)?;
    let rows = fetch_slice(&state.db_pool, from, to).await?;
    Ok(Json(rows.into_iter().map(DailyRecordResponse::from).collect()))
}

// POST /records/save - reconcile an edited slice against the backing rows
pub async fn save_records(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SaveRecordsRequest>,
) -> Result<Json<SaveRecordsResponse>, AppError> {
    if req.rows.is_empty() {
        return Err(AppError::validation("No edited rows to save"));
    }
    if auth.role != Role::Manager && req.rows.iter().any(|r| r.target_revenue.is_some()) {
        return Err(AppError::forbidden("Only managers can edit revenue targets"));
    }
    if req.rows.iter().any(RecordEdit::has_negative_value) {
        return Err(AppError::validation("Values must not be negative"));
    }

    let (updated, skipped_dates) = apply_record_edits(&state.db_pool, &req.rows).await?;
    info!(
        user = %auth.username,
        updated,
        skipped = skipped_dates.len(),
        "Saved daily record batch"
    );
    Ok(Json(SaveRecordsResponse { updated, skipped_dates }))
}

// GET /records/export - flat-file snapshot, header plus one line per date
#[instrument(skip(state))]
pub async fn export_records(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> Result<impl IntoResponse, AppError> {
    let (from, to) = resolve_slice(&params, state.managed_year)?;
    let rows = fetch_slice(&state.db_pool, from, to).await?;

    let mut csv = String::from(
        "日期,星期,目標營業額,實際營業額,達成率,來客數,客單價,麵包營業額,麵包個數,麵包報廢,\
         商品營業額,NCB,BAF,節慶商品,UberEats,Foodpanda,工時,工時貢獻,備註\n",
    );
    for r in &rows {
        // Commas in free-text notes would shift columns; swap for full-width.
        let note = r.note.replace(',', "，").replace('\n', " ");
        csv.push_str(&format!(
            "{},{},{:.0},{:.0},{:.1},{},{:.0},{:.0},{},{},{:.0},{},{},{},{:.0},{:.0},{:.1},{:.0},{}\n",
            r.record_date,
            calendar::day_label(r.record_date),
            r.target_revenue,
            r.actual_revenue,
            r.achievement_rate,
            r.customer_count,
            r.average_ticket,
            r.pastry_revenue,
            r.pastry_units,
            r.pastry_waste_units,
            r.retail_revenue,
            r.ncb_count,
            r.baf_count,
            r.festival_units,
            r.delivery_ubereats,
            r.delivery_foodpanda,
            r.labor_hours,
            r.labor_contribution,
            note,
        ));
    }

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// Reconcile edited rows against the backing set in one transaction. Each
/// edit overwrites only the fields it carries, then the derived fields are
/// recomputed from the just-written inputs. Dates with no backing row are
/// collected and skipped, never invented.
pub(crate) async fn apply_record_edits(
    pool: &SqlitePool,
    rows: &[RecordEdit],
) -> Result<(usize, Vec<NaiveDate>), AppError> {
    let mut tx = pool.begin().await?;
    let mut updated = 0;
    let mut skipped = Vec::new();

    for edit in rows {
        let select = format!("SELECT {RECORD_COLUMNS} FROM daily_records WHERE record_date = ?");
        let existing = sqlx::query_as::<_, DailyRecord>(&select)
            .bind(edit.record_date)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut record) = existing else {
            skipped.push(edit.record_date);
            continue;
        };

        edit.apply_to(&mut record);
        record.achievement_rate =
            metrics::achievement_rate(record.actual_revenue, record.target_revenue);
        record.average_ticket =
            metrics::average_ticket(record.actual_revenue, record.customer_count);
        record.labor_contribution =
            metrics::labor_contribution(record.actual_revenue, record.labor_hours);

        sqlx::query(
            "UPDATE daily_records SET target_revenue = ?, actual_revenue = ?, \
             achievement_rate = ?, customer_count = ?, average_ticket = ?, \
             pastry_revenue = ?, pastry_units = ?, pastry_waste_units = ?, \
             retail_revenue = ?, ncb_count = ?, baf_count = ?, festival_units = ?, \
             delivery_ubereats = ?, delivery_foodpanda = ?, labor_hours = ?, \
             labor_contribution = ?, note = ? WHERE record_date = ?",
        )
        .bind(record.target_revenue)
        .bind(record.actual_revenue)
        .bind(record.achievement_rate)
        .bind(record.customer_count)
        .bind(record.average_ticket)
        .bind(record.pastry_revenue)
        .bind(record.pastry_units)
        .bind(record.pastry_waste_units)
        .bind(record.retail_revenue)
        .bind(record.ncb_count)
        .bind(record.baf_count)
        .bind(record.festival_units)
        .bind(record.delivery_ubereats)
        .bind(record.delivery_foodpanda)
        .bind(record.labor_hours)
        .bind(record.labor_contribution)
        .bind(record.note)
        .bind(record.record_date)
        .execute(&mut *tx)
        .await?;

        updated += 1;
    }

    tx.commit().await?;
    Ok((updated, skipped))
}

pub(crate) async fn fetch_slice(
    pool: &SqlitePool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DailyRecord>, AppError> {
    let select = format!(
        "SELECT {RECORD_COLUMNS} FROM daily_records \
         WHERE record_date BETWEEN ? AND ? ORDER BY record_date"
    );
    let rows = sqlx::query_as::<_, DailyRecord>(&select)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Resolve the month/from-to query into an inclusive date range. With no
/// selector at all, defaults to the current month (UTC+8) of the managed
/// year.
pub(crate) fn resolve_slice(
    params: &SliceParams,
    managed_year: i32,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    if params.from.is_some() || params.to.is_some() {
        let (Some(from), Some(to)) = (params.from, params.to) else {
            return Err(AppError::validation("Both from and to are required for a range"));
        };
        if from > to {
            return Err(AppError::validation("from must not be after to"));
        }
        return Ok((from, to));
    }

    let month = params.month.unwrap_or_else(calendar::current_month_taipei);
    let first = NaiveDate::from_ymd_opt(managed_year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month {month}")))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(managed_year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(managed_year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("Invalid month {month}")))?;
    let last = next_first
        .pred_opt()
        .ok_or_else(|| AppError::validation(format!("Invalid month {month}")))?;
    Ok((first, last))
}
