use axum::extract::State;
use axum::{Extension, Json};
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::calendar;
use crate::dtos::staff_leave::{SaveStaffLeavesRequest, StaffLeaveRow};
use crate::error::AppError;
use crate::leave::{self, LeaveWarning};
use crate::middleware::auth::AuthContext;
use crate::models::staff_leave::StaffLeave;
use crate::state::AppState;

const LEAVE_COLUMNS: &str = "id, name, grade, annual_cycle_start, annual_cycle_end, \
    annual_hours_left, comp_cycle_start, comp_cycle_end, comp_hours_left, special_name, \
    special_cycle_start, special_cycle_end, special_hours_left";

// GET /leaves - full staff leave set
#[instrument(skip(state))]
pub async fn list_staff_leaves(
    State(state): State<AppState>,
) -> Result<Json<Vec<StaffLeave>>, AppError> {
    let rows = fetch_staff_leaves(&state.db_pool).await?;
    Ok(Json(rows))
}

// POST /leaves/save - replace the full set
pub async fn save_staff_leaves(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SaveStaffLeavesRequest>,
) -> Result<Json<Vec<StaffLeave>>, AppError> {
    for row in &req.rows {
        if row.name.trim().is_empty() {
            return Err(AppError::validation("Staff name is required"));
        }
        if row.annual_hours_left < 0.0 || row.comp_hours_left < 0.0 || row.special_hours_left < 0.0 {
            return Err(AppError::validation("Leave balances must not be negative"));
        }
    }

    replace_staff_leaves(&state.db_pool, &req.rows).await?;
    info!(user = %auth.username, staff = req.rows.len(), "Replaced staff leave set");

    let rows = fetch_staff_leaves(&state.db_pool).await?;
    Ok(Json(rows))
}

// GET /leaves/expiring - cycles ending inside the look-ahead window with
// unused balance
#[instrument(skip(state))]
pub async fn expiring_leaves(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaveWarning>>, AppError> {
    let rows = fetch_staff_leaves(&state.db_pool).await?;
    let warnings = leave::expiring_warnings(&rows, calendar::today_taipei());
    Ok(Json(warnings))
}

/// Bulk overwrite of the staff set. Legacy cycle-range strings are resolved
/// to typed dates here; malformed strings resolve to no cycle and the row is
/// kept without one.
pub(crate) async fn replace_staff_leaves(
    pool: &SqlitePool,
    rows: &[StaffLeaveRow],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM staff_leaves").execute(&mut *tx).await?;

    for row in rows {
        let (annual_start, annual_end) = StaffLeaveRow::resolve_cycle(
            row.annual_cycle_start,
            row.annual_cycle_end,
            row.annual_cycle.as_deref(),
        );
        let (comp_start, comp_end) = StaffLeaveRow::resolve_cycle(
            row.comp_cycle_start,
            row.comp_cycle_end,
            row.comp_cycle.as_deref(),
        );
        let (special_start, special_end) = StaffLeaveRow::resolve_cycle(
            row.special_cycle_start,
            row.special_cycle_end,
            row.special_cycle.as_deref(),
        );

        sqlx::query(
            "INSERT INTO staff_leaves (name, grade, annual_cycle_start, annual_cycle_end, \
             annual_hours_left, comp_cycle_start, comp_cycle_end, comp_hours_left, \
             special_name, special_cycle_start, special_cycle_end, special_hours_left) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.name)
        .bind(&row.grade)
        .bind(annual_start)
        .bind(annual_end)
        .bind(row.annual_hours_left)
        .bind(comp_start)
        .bind(comp_end)
        .bind(row.comp_hours_left)
        .bind(&row.special_name)
        .bind(special_start)
        .bind(special_end)
        .bind(row.special_hours_left)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub(crate) async fn fetch_staff_leaves(pool: &SqlitePool) -> Result<Vec<StaffLeave>, AppError> {
    let select = format!("SELECT {LEAVE_COLUMNS} FROM staff_leaves ORDER BY id");
    let rows = sqlx::query_as::<_, StaffLeave>(&select).fetch_all(pool).await?;
    Ok(rows)
}
