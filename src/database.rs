// src/database.rs
use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::warn;

/// Columns every daily record row must carry. A backing store missing any of
/// these is treated as a schema mismatch and destructively re-initialized.
const REQUIRED_RECORD_COLUMNS: &[&str] = &[
    "record_date",
    "target_revenue",
    "actual_revenue",
    "achievement_rate",
    "customer_count",
    "average_ticket",
    "pastry_revenue",
    "pastry_units",
    "pastry_waste_units",
    "retail_revenue",
    "ncb_count",
    "baf_count",
    "festival_units",
    "delivery_ubereats",
    "delivery_foodpanda",
    "labor_hours",
    "labor_contribution",
    "note",
];

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Create all tables, re-initializing the daily record set when its schema
/// does not match. Returns true when a fresh record set was seeded.
pub async fn ensure_schema(pool: &SqlitePool, year: i32) -> Result<bool, sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS gift_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            campaign TEXT NOT NULL,
            item_name TEXT NOT NULL,
            allocated REAL NOT NULL DEFAULT 0,
            remaining REAL NOT NULL DEFAULT 0,
            sell_through_rate REAL NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS staff_leaves (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            grade TEXT NOT NULL DEFAULT '',
            annual_cycle_start TEXT,
            annual_cycle_end TEXT,
            annual_hours_left REAL NOT NULL DEFAULT 0,
            comp_cycle_start TEXT,
            comp_cycle_end TEXT,
            comp_hours_left REAL NOT NULL DEFAULT 0,
            special_name TEXT,
            special_cycle_start TEXT,
            special_cycle_end TEXT,
            special_hours_left REAL NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await?;

    if record_schema_matches(pool).await? {
        return Ok(false);
    }

    warn!(year, "Daily record schema mismatch, re-initializing record set");
    reinitialize_records(pool, year).await?;
    Ok(true)
}

async fn record_schema_matches(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('daily_records')")
            .fetch_all(pool)
            .await?;
    if columns.is_empty() {
        return Ok(false);
    }
    Ok(REQUIRED_RECORD_COLUMNS
        .iter()
        .all(|required| columns.iter().any(|c| c == required)))
}

/// Drop and recreate the daily record set: one zeroed row per date of the
/// managed year. Destroys any out-of-schema data, matching the source
/// system's behavior on schema mismatch.
async fn reinitialize_records(pool: &SqlitePool, year: i32) -> Result<(), sqlx::Error> {
    let (Some(mut day), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Err(sqlx::Error::Protocol(format!("invalid managed year {year}")));
    };

    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS daily_records")
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "CREATE TABLE daily_records (
            record_date TEXT PRIMARY KEY,
            target_revenue REAL NOT NULL DEFAULT 0,
            actual_revenue REAL NOT NULL DEFAULT 0,
            achievement_rate REAL NOT NULL DEFAULT 0,
            customer_count INTEGER NOT NULL DEFAULT 0,
            average_ticket REAL NOT NULL DEFAULT 0,
            pastry_revenue REAL NOT NULL DEFAULT 0,
            pastry_units INTEGER NOT NULL DEFAULT 0,
            pastry_waste_units INTEGER NOT NULL DEFAULT 0,
            retail_revenue REAL NOT NULL DEFAULT 0,
            ncb_count INTEGER NOT NULL DEFAULT 0,
            baf_count INTEGER NOT NULL DEFAULT 0,
            festival_units INTEGER NOT NULL DEFAULT 0,
            delivery_ubereats REAL NOT NULL DEFAULT 0,
            delivery_foodpanda REAL NOT NULL DEFAULT 0,
            labor_hours REAL NOT NULL DEFAULT 0,
            labor_contribution REAL NOT NULL DEFAULT 0,
            note TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(&mut *tx)
    .await?;

    while day <= last {
        sqlx::query("INSERT INTO daily_records (record_date) VALUES (?)")
            .bind(day)
            .execute(&mut *tx)
            .await?;
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn seeds_full_year_of_zeroed_records() {
        let pool = memory_pool().await;
        let reinitialized = ensure_schema(&pool, 2025).await.unwrap();
        assert!(reinitialized);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 365);

        let nonzero: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM daily_records WHERE actual_revenue <> 0")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(nonzero, 0);
    }

    #[tokio::test]
    async fn matching_schema_is_left_alone() {
        let pool = memory_pool().await;
        assert!(ensure_schema(&pool, 2025).await.unwrap());

        sqlx::query("UPDATE daily_records SET actual_revenue = 999 WHERE record_date = '2025-03-01'")
            .execute(&pool)
            .await
            .unwrap();

        assert!(!ensure_schema(&pool, 2025).await.unwrap());

        let kept: f64 = sqlx::query_scalar(
            "SELECT actual_revenue FROM daily_records WHERE record_date = '2025-03-01'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(kept, 999.0);
    }

    #[tokio::test]
    async fn missing_column_triggers_reinitialization() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE daily_records (record_date TEXT PRIMARY KEY, actual_revenue REAL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO daily_records VALUES ('2025-01-01', 123)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(ensure_schema(&pool, 2025).await.unwrap());

        // Out-of-schema data is gone, replaced by the zeroed set.
        let value: f64 = sqlx::query_scalar(
            "SELECT actual_revenue FROM daily_records WHERE record_date = '2025-01-01'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(value, 0.0);
    }

    #[tokio::test]
    async fn leap_year_gets_366_rows() {
        let pool = memory_pool().await;
        ensure_schema(&pool, 2024).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 366);
    }
}
