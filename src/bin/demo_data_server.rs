use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use playlist_recs::api::{create_router, ApiState, DemoDataset};

/// Demo listening-data API
///
/// Serves the records the pipeline consumes, backed by a CSV file that is
/// bootstrapped with fixture data on first start. Stands in for whatever
/// real system owns the listening history.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let csv_path =
        std::env::var("LISTENING_CSV_PATH").unwrap_or_else(|_| "listening_data.csv".to_string());
    let bind_addr =
        std::env::var("DEMO_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());

    let dataset = DemoDataset::load_or_bootstrap(Path::new(&csv_path))
        .context("Failed to load listening dataset")?;

    let app = create_router(ApiState::new(dataset));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "Demo data API listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
