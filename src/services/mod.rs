pub mod aggregate;
pub mod gate;
pub mod messages;
pub mod pipeline;
pub mod providers;
pub mod qualify;

pub use gate::{GateResult, JsonFileSink, RecommendationSink};
pub use pipeline::{Pipeline, PipelineReport, PipelineState};
pub use providers::{HttpRecordSource, RecordSource};
