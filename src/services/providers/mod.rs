/// Listening-data provider abstraction
///
/// The pipeline only depends on this contract; how the records are
/// produced (the demo CSV-backed API, a real service, a test fixture) is
/// the provider's business.
use crate::{error::AppResult, models::ListeningRecord};

pub mod http;

pub use http::HttpRecordSource;

/// Trait for listening-record providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all listening records in one batch
    ///
    /// An empty sequence is a valid result, not an error.
    async fn fetch_records(&self) -> AppResult<Vec<ListeningRecord>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
