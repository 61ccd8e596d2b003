// src/state.rs
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    /// Calendar year the daily record set covers (one row per date).
    pub managed_year: i32,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, managed_year: i32) -> Self {
        Self { db_pool, managed_year }
    }
}
