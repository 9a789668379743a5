use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::ListeningRecord,
    services::providers::RecordSource,
};

/// Fetches listening records from the data API over HTTP
///
/// Expects `GET {base_url}/music-data` to return a JSON array of record
/// objects. Transport failures and non-success statuses are returned as
/// errors; degrading them to an empty batch is the pipeline's call, not
/// this client's.
#[derive(Clone)]
pub struct HttpRecordSource {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecordSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> AppResult<Vec<ListeningRecord>> {
        let url = format!("{}/music-data", self.base_url);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Data API returned status {}: {}",
                status, body
            )));
        }

        let records: Vec<ListeningRecord> = response.json().await.map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse data API response: {}", e))
        })?;

        tracing::info!(
            url = %url,
            records = records.len(),
            "Listening records fetched"
        );

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_name() {
        let source = HttpRecordSource::new("http://127.0.0.1:8000");
        assert_eq!(source.name(), "http");
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_error() {
        // Port 9 (discard) is not serving HTTP; the fetch must fail
        // cleanly instead of hanging or panicking.
        let source = HttpRecordSource::new("http://127.0.0.1:9");
        let result = source.fetch_records().await;
        assert!(result.is_err());
    }
}
