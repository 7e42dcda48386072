//! Standalone clinic API server binary.
//!
//! Binds the HTTP surface to a SQLite file and serves it. Configured
//! through environment variables (a `.env` file is honored):
//! `CHAIRSIDE_ADDR` (default `0.0.0.0:3000`) and `CHAIRSIDE_DB`
//! (default `chairside.db`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chairside_api::{app, AppState};
use chairside_core::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chairside_api=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CHAIRSIDE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let db_path = std::env::var("CHAIRSIDE_DB").unwrap_or_else(|_| "chairside.db".into());

    tracing::info!("-- Starting chairside API on {}", addr);
    tracing::info!("-- Clinic database at {}", db_path);

    let db = Database::open(&db_path)?;
    let state = AppState::new(db);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
