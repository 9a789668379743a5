use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::ListeningRecord;

/// Shared state of the demo data API
#[derive(Clone)]
pub struct ApiState {
    pub dataset: Arc<DemoDataset>,
}

impl ApiState {
    pub fn new(dataset: DemoDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

/// Listening records served by the demo API, loaded once at startup
///
/// The records live in a CSV file. When the file does not exist yet it is
/// bootstrapped with a fixed demo dataset, so the API always has data to
/// serve. The dataset is immutable after loading.
#[derive(Debug)]
pub struct DemoDataset {
    records: Vec<ListeningRecord>,
}

impl DemoDataset {
    /// Loads the dataset from a CSV file, creating the file first if missing
    pub fn load_or_bootstrap(path: &Path) -> AppResult<Self> {
        if path.exists() {
            tracing::info!(path = %path.display(), "Using existing listening-data file");
        } else {
            tracing::info!(path = %path.display(), "Listening-data file missing; creating demo fixture");
            bootstrap_fixture(path)?;
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::Internal(format!("failed to open {}: {}", path.display(), e))
        })?;

        let records: Vec<ListeningRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .map_err(|e| {
                AppError::Internal(format!("failed to parse {}: {}", path.display(), e))
            })?;

        tracing::info!(records = records.len(), "Listening dataset loaded");

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ListeningRecord] {
        &self.records
    }
}

/// Writes the fixed demo dataset to a fresh CSV file
fn bootstrap_fixture(path: &Path) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::Persistence(format!("failed to create {}: {}", path.display(), e))
    })?;

    for record in demo_records() {
        writer
            .serialize(record)
            .map_err(|e| AppError::Persistence(format!("failed to write fixture row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::Persistence(format!("failed to flush fixture file: {}", e)))?;

    Ok(())
}

/// Ten demo users with three listening records each
fn demo_records() -> Vec<ListeningRecord> {
    let rows: [(u64, &str, &str, u64); 30] = [
        (101, "Ana Silva", "The Beatles", 150),
        (101, "Ana Silva", "Queen", 120),
        (101, "Ana Silva", "Michael Jackson", 100),
        (102, "Bruno Costa", "The Beatles", 160),
        (102, "Bruno Costa", "Queen", 130),
        (102, "Bruno Costa", "Coldplay", 40),
        (103, "Carla Dias", "The Beatles", 80),
        (103, "Carla Dias", "Queen", 70),
        (103, "Carla Dias", "Michael Jackson", 60),
        (104, "Daniel Alves", "The Beatles", 200),
        (104, "Daniel Alves", "Adele", 20),
        (104, "Daniel Alves", "Ed Sheeran", 10),
        (105, "Eduarda Lima", "The Beatles", 180),
        (105, "Eduarda Lima", "Queen", 150),
        (105, "Eduarda Lima", "Michael Jackson", 130),
        (106, "Fernando Souza", "Justin Bieber", 30),
        (106, "Fernando Souza", "Taylor Swift", 25),
        (106, "Fernando Souza", "Dua Lipa", 20),
        (107, "Gabriela Mendes", "The Beatles", 90),
        (107, "Gabriela Mendes", "Queen", 85),
        (107, "Gabriela Mendes", "Michael Jackson", 80),
        (108, "Heloísa Neves", "The Beatles", 110),
        (108, "Heloísa Neves", "Queen", 95),
        (108, "Heloísa Neves", "Coldplay", 30),
        (109, "Igor Rocha", "The Beatles", 75),
        (109, "Igor Rocha", "Queen", 65),
        (109, "Igor Rocha", "Michael Jackson", 55),
        (110, "Julia Santos", "Justin Bieber", 40),
        (110, "Julia Santos", "Taylor Swift", 35),
        (110, "Julia Santos", "Dua Lipa", 30),
    ];

    rows.into_iter()
        .map(|(user_id, user_name, artist_name, play_count)| ListeningRecord {
            user_id,
            user_name: user_name.to_string(),
            artist_name: artist_name.to_string(),
            play_count,
        })
        .collect()
}
