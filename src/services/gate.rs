use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::models::Recommendation;

/// Outcome of the minimum-population gate, carrying the message count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResult {
    /// Messages were written to the sink
    Committed(usize),
    /// Population below the minimum; nothing was written
    Skipped(usize),
}

/// Destination for a committed recommendation mapping
///
/// Keys are user ids; serde_json renders them as string object keys, the
/// same on-disk shape the data consumers already expect.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSink: Send + Sync {
    /// Persist the full mapping in one write
    async fn write(&self, recommendations: &BTreeMap<u64, Recommendation>) -> AppResult<()>;

    /// Sink name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Writes recommendations as a pretty-printed UTF-8 JSON document
///
/// Non-ASCII characters are preserved literally; serde_json does not
/// escape them.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl RecommendationSink for JsonFileSink {
    async fn write(&self, recommendations: &BTreeMap<u64, Recommendation>) -> AppResult<()> {
        let document = serde_json::to_string_pretty(recommendations)
            .map_err(|e| AppError::Persistence(format!("serialization failed: {}", e)))?;

        tokio::fs::write(&self.path, document).await.map_err(|e| {
            AppError::Persistence(format!("writing {} failed: {}", self.path.display(), e))
        })?;

        tracing::info!(
            path = %self.path.display(),
            users = recommendations.len(),
            "Recommendations saved"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

/// Commits the messages only when the qualified population is large enough
///
/// This is a hard, all-or-nothing gate: either the whole mapping is
/// written or nothing is. A min_count of zero always commits, including
/// an empty mapping. Sink failures surface as `AppError::Persistence`
/// and are not retried here; retry policy belongs to the caller.
pub async fn commit(
    messages: &BTreeMap<u64, Recommendation>,
    min_count: u64,
    sink: &dyn RecommendationSink,
) -> AppResult<GateResult> {
    let count = messages.len();

    if (count as u64) < min_count {
        tracing::info!(
            qualified = count,
            min_qualified = min_count,
            "Below minimum population; no recommendations written"
        );
        return Ok(GateResult::Skipped(count));
    }

    sink.write(messages).await?;

    tracing::info!(
        qualified = count,
        min_qualified = min_count,
        sink = sink.name(),
        "Recommendations committed"
    );

    Ok(GateResult::Committed(count))
}
