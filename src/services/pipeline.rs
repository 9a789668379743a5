use std::sync::Arc;

use crate::error::AppResult;
use crate::services::gate::{self, GateResult, RecommendationSink};
use crate::services::providers::RecordSource;
use crate::services::{aggregate, messages, qualify};

/// Stages a pipeline run moves through
///
/// A run that extracts no records short-circuits straight from `Idle` to
/// `Done` without touching the transform stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Extracted,
    Transformed,
    Gated,
    Done,
}

/// Summary of a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub records_fetched: usize,
    pub profiles_built: usize,
    pub qualified_count: usize,
    /// None when the run short-circuited before reaching the gate
    pub gate: Option<GateResult>,
    pub final_state: PipelineState,
}

impl PipelineReport {
    fn short_circuited() -> Self {
        Self {
            records_fetched: 0,
            profiles_built: 0,
            qualified_count: 0,
            gate: None,
            final_state: PipelineState::Done,
        }
    }
}

/// Sequences extraction, transformation and gated loading
///
/// Each run is a pure sequential composition over immutable inputs; the
/// only side effects are the one read from the record source and at most
/// one write through the sink. Runs hold no cross-run state, so a caller
/// may invoke them repeatedly without coordination.
pub struct Pipeline {
    source: Arc<dyn RecordSource>,
    sink: Arc<dyn RecommendationSink>,
    targets: Vec<String>,
    threshold: u64,
    min_qualified: u64,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn RecordSource>,
        sink: Arc<dyn RecommendationSink>,
        targets: Vec<String>,
        threshold: u64,
        min_qualified: u64,
    ) -> Self {
        Self {
            source,
            sink,
            targets,
            threshold,
            min_qualified,
        }
    }

    /// Executes one full run
    ///
    /// Source failures are captured here at the boundary and degraded to
    /// an empty record batch; they terminate the run cleanly with zero
    /// output instead of propagating. The only error this returns is a
    /// sink failure from the gate.
    pub async fn run(&self) -> AppResult<PipelineReport> {
        let mut state = PipelineState::Idle;
        tracing::info!(
            state = ?state,
            source = self.source.name(),
            targets = ?self.targets,
            threshold = self.threshold,
            min_qualified = self.min_qualified,
            "Pipeline run started"
        );

        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source = self.source.name(),
                    "Record source unavailable; treating as empty"
                );
                Vec::new()
            }
        };

        if records.is_empty() {
            tracing::info!("No listening records to process; pipeline finished early");
            return Ok(PipelineReport::short_circuited());
        }
        state = PipelineState::Extracted;
        tracing::debug!(records = records.len(), state = ?state, "Extraction completed");

        let profiles = aggregate::aggregate(&records, &self.targets);
        let qualified = qualify::qualify(&profiles, &self.targets, self.threshold);
        let recommendations = messages::generate(&qualified, &self.targets);
        state = PipelineState::Transformed;
        tracing::info!(
            profiles = profiles.len(),
            qualified = qualified.len(),
            state = ?state,
            "Transformation completed"
        );

        let gate_result =
            gate::commit(&recommendations, self.min_qualified, self.sink.as_ref()).await?;
        state = PipelineState::Gated;
        tracing::debug!(gate = ?gate_result, state = ?state, "Gate evaluated");

        state = PipelineState::Done;
        let report = PipelineReport {
            records_fetched: records.len(),
            profiles_built: profiles.len(),
            qualified_count: qualified.len(),
            gate: Some(gate_result),
            final_state: state,
        };
        tracing::info!(report = ?report, "Pipeline run completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ListeningRecord;
    use crate::services::gate::MockRecommendationSink;
    use crate::services::providers::MockRecordSource;

    fn record(user_id: u64, user_name: &str, artist: &str, plays: u64) -> ListeningRecord {
        ListeningRecord {
            user_id,
            user_name: user_name.to_string(),
            artist_name: artist.to_string(),
            play_count: plays,
        }
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_source_failure_degrades_to_empty_run() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_records()
            .times(1)
            .returning(|| Err(AppError::ExternalApi("connection refused".to_string())));
        source.expect_name().return_const("mock");

        let mut sink = MockRecommendationSink::new();
        sink.expect_write().times(0);

        let pipeline = Pipeline::new(
            Arc::new(source),
            Arc::new(sink),
            targets(&["Queen"]),
            70,
            1,
        );

        let report = pipeline.run().await.unwrap();
        assert_eq!(report, PipelineReport::short_circuited());
    }

    #[tokio::test]
    async fn test_empty_source_short_circuits_before_gate() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_records()
            .times(1)
            .returning(|| Ok(Vec::new()));
        source.expect_name().return_const("mock");

        let mut sink = MockRecommendationSink::new();
        // min_qualified of zero would normally commit even an empty
        // mapping, but the short circuit happens before the gate.
        sink.expect_write().times(0);

        let pipeline = Pipeline::new(
            Arc::new(source),
            Arc::new(sink),
            targets(&["Queen"]),
            70,
            0,
        );

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.final_state, PipelineState::Done);
        assert_eq!(report.gate, None);
        assert_eq!(report.qualified_count, 0);
    }

    #[tokio::test]
    async fn test_full_run_commits_when_population_reaches_minimum() {
        let mut source = MockRecordSource::new();
        source.expect_fetch_records().times(1).returning(|| {
            Ok(vec![
                record(1, "A", "X", 80),
                record(1, "A", "Y", 80),
                record(1, "A", "Z", 80),
                record(2, "B", "X", 10),
            ])
        });
        source.expect_name().return_const("mock");

        let mut sink = MockRecommendationSink::new();
        sink.expect_write()
            .withf(|m| m.len() == 1 && m.contains_key(&1) && m[&1].user_name == "A")
            .times(1)
            .returning(|_| Ok(()));
        sink.expect_name().return_const("mock");

        let pipeline = Pipeline::new(
            Arc::new(source),
            Arc::new(sink),
            targets(&["X", "Y", "Z"]),
            70,
            1,
        );

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.records_fetched, 4);
        assert_eq!(report.profiles_built, 2);
        assert_eq!(report.qualified_count, 1);
        assert_eq!(report.gate, Some(GateResult::Committed(1)));
        assert_eq!(report.final_state, PipelineState::Done);
    }

    #[tokio::test]
    async fn test_full_run_skips_below_minimum() {
        let mut source = MockRecordSource::new();
        source.expect_fetch_records().times(1).returning(|| {
            Ok(vec![
                record(1, "A", "X", 80),
                record(2, "B", "X", 10),
            ])
        });
        source.expect_name().return_const("mock");

        let mut sink = MockRecommendationSink::new();
        sink.expect_write().times(0);

        let pipeline = Pipeline::new(
            Arc::new(source),
            Arc::new(sink),
            targets(&["X"]),
            70,
            2,
        );

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.qualified_count, 1);
        assert_eq!(report.gate, Some(GateResult::Skipped(1)));
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_records()
            .times(1)
            .returning(|| Ok(vec![record(1, "A", "X", 80)]));
        source.expect_name().return_const("mock");

        let mut sink = MockRecommendationSink::new();
        sink.expect_write()
            .times(1)
            .returning(|_| Err(AppError::Persistence("disk full".to_string())));

        let pipeline = Pipeline::new(
            Arc::new(source),
            Arc::new(sink),
            targets(&["X"]),
            70,
            1,
        );

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
