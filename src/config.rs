use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the listening-data API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Artists a user must listen to in order to qualify (comma separated)
    #[serde(default = "default_target_artists")]
    pub target_artists: Vec<String>,

    /// Minimum summed play count required per target artist
    #[serde(default = "default_play_count_threshold")]
    pub play_count_threshold: u64,

    /// Minimum number of qualified users before recommendations are written
    #[serde(default = "default_min_qualified")]
    pub min_qualified: u64,

    /// Path of the recommendations JSON document
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_target_artists() -> Vec<String> {
    vec![
        "The Beatles".to_string(),
        "Queen".to_string(),
        "Michael Jackson".to_string(),
    ]
}

fn default_play_count_threshold() -> u64 {
    70
}

fn default_min_qualified() -> u64 {
    5
}

fn default_output_path() -> String {
    "playlist_recommendations.json".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Validates configuration before any records are processed
    ///
    /// Threshold and minimum count are unsigned, so negative values are
    /// unrepresentable; what remains to check is empty or blank strings.
    /// An empty target set is legal (nobody will qualify) but almost
    /// certainly a mistake, so it is logged rather than rejected.
    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "api_base_url must not be empty".to_string(),
            ));
        }

        if self.output_path.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "output_path must not be empty".to_string(),
            ));
        }

        if self.target_artists.iter().any(|a| a.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "target_artists must not contain blank entries".to_string(),
            ));
        }

        if self.target_artists.is_empty() {
            tracing::warn!("target_artists is empty; no user can qualify");
        }

        Ok(())
    }
}
