use axum::extract::State;
use axum::{Extension, Json};
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::dtos::gift_item::{GiftItemRow, SaveGiftItemsRequest};
use crate::error::AppError;
use crate::metrics;
use crate::middleware::auth::AuthContext;
use crate::models::gift_item::GiftItem;
use crate::state::AppState;

// GET /gifts - full gift control set
#[instrument(skip(state))]
pub async fn list_gift_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftItem>>, AppError> {
    let items = fetch_gift_items(&state.db_pool).await?;
    Ok(Json(items))
}

// POST /gifts/save - replace the full set, recomputing sell-through
pub async fn save_gift_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SaveGiftItemsRequest>,
) -> Result<Json<Vec<GiftItem>>, AppError> {
    for item in &req.items {
        if item.campaign.trim().is_empty() || item.item_name.trim().is_empty() {
            return Err(AppError::validation("Campaign and item name are required"));
        }
        if item.allocated < 0.0 || item.remaining < 0.0 {
            return Err(AppError::validation("Allocations must not be negative"));
        }
        if item.remaining > item.allocated {
            return Err(AppError::validation("Remaining cannot exceed the original allocation"));
        }
    }

    replace_gift_items(&state.db_pool, &req.items).await?;
    info!(user = %auth.username, items = req.items.len(), "Replaced gift control set");

    let items = fetch_gift_items(&state.db_pool).await?;
    Ok(Json(items))
}

/// Bulk overwrite: the grid is the source of truth, so the stored set is
/// replaced wholesale in one transaction.
pub(crate) async fn replace_gift_items(
    pool: &SqlitePool,
    items: &[GiftItemRow],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM gift_items").execute(&mut *tx).await?;

    for item in items {
        let rate = metrics::sell_through_rate(item.allocated, item.remaining);
        sqlx::query(
            "INSERT INTO gift_items (campaign, item_name, allocated, remaining, sell_through_rate) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&item.campaign)
        .bind(&item.item_name)
        .bind(item.allocated)
        .bind(item.remaining)
        .bind(rate)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub(crate) async fn fetch_gift_items(pool: &SqlitePool) -> Result<Vec<GiftItem>, AppError> {
    let items = sqlx::query_as::<_, GiftItem>(
        "SELECT id, campaign, item_name, allocated, remaining, sell_through_rate \
         FROM gift_items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ensure_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        ensure_schema(&pool, 2025).await.expect("schema");
        pool
    }

    fn row(campaign: &str, item: &str, allocated: f64, remaining: f64) -> GiftItemRow {
        GiftItemRow {
            campaign: campaign.to_string(),
            item_name: item.to_string(),
            allocated,
            remaining,
        }
    }

    #[tokio::test]
    async fn save_replaces_set_and_derives_sell_through() {
        let pool = seeded_pool().await;

        replace_gift_items(&pool, &[row("週年慶", "馬克杯", 200.0, 50.0)]).await.unwrap();
        let items = fetch_gift_items(&pool).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sell_through_rate, 75.0);

        // A second save with a different set fully replaces the first.
        replace_gift_items(
            &pool,
            &[
                row("聖誕", "保溫瓶", 100.0, 100.0),
                row("聖誕", "掛耳禮盒", 80.0, 20.0),
            ],
        )
        .await
        .unwrap();
        let items = fetch_gift_items(&pool).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sell_through_rate, 0.0);
        assert_eq!(items[1].sell_through_rate, 75.0);
    }

    #[tokio::test]
    async fn empty_save_clears_the_set() {
        let pool = seeded_pool().await;
        replace_gift_items(&pool, &[row("週年慶", "馬克杯", 200.0, 50.0)]).await.unwrap();
        replace_gift_items(&pool, &[]).await.unwrap();
        assert!(fetch_gift_items(&pool).await.unwrap().is_empty());
    }
}
