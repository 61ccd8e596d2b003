// src/main.rs
mod auth;
mod calendar;
mod database;
mod dtos;
mod error;
mod handlers;
mod leave;
mod metrics;
mod middleware;
mod models;
mod routes;
mod state;

use axum::{routing::get, Router};
use tracing_subscriber::fmt::init as tracing_init;
use tokio::net::TcpListener;
use dotenvy::dotenv;
use std::net::{SocketAddr, IpAddr};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Create store pool
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://cafeops.db".to_string());
    let db_pool = database::create_pool(&database_url).await
        .expect("Failed to create store pool");

    // One record row per date of the managed year
    let managed_year = std::env::var("MANAGED_YEAR")
        .ok()
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(calendar::CALENDAR_YEAR);

    match database::ensure_schema(&db_pool, managed_year).await {
        Ok(true) => tracing::info!(managed_year, "Seeded fresh daily record set"),
        Ok(false) => tracing::info!(managed_year, "Record schema up to date"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to prepare the backing store");
            return;
        }
    }

    // Create application state
    let app_state = state::AppState::new(db_pool, managed_year);

    // Build application under /CafeOps base path
    let api = routes::create_router()
        .route("/", get(|| async { "CafeOps API" }))
        .route("/health", get(health_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/CafeOps", api)
        .layer(cors)
        .with_state(app_state);

    // Start server with HOST/PORT env and graceful port selection
    let host_str = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let host: IpAddr = host_str.parse().unwrap_or_else(|_| "127.0.0.1".parse().unwrap());
    let base_port = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(3000);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
