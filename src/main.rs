use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use playlist_recs::{
    config::Config,
    services::{GateResult, HttpRecordSource, JsonFileSink, Pipeline},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    let source = Arc::new(HttpRecordSource::new(config.api_base_url.clone()));
    let sink = Arc::new(JsonFileSink::new(config.output_path.clone()));
    let pipeline = Pipeline::new(
        source,
        sink,
        config.target_artists.clone(),
        config.play_count_threshold,
        config.min_qualified,
    );

    let report = pipeline.run().await.context("Pipeline run failed")?;

    match report.gate {
        Some(GateResult::Committed(count)) => tracing::info!(
            users = count,
            output = %config.output_path,
            "Playlist recommendations written"
        ),
        Some(GateResult::Skipped(count)) => tracing::info!(
            users = count,
            min_qualified = config.min_qualified,
            "Qualified population below minimum; nothing written"
        ),
        None => tracing::info!("No listening data available; nothing written"),
    }

    Ok(())
}
