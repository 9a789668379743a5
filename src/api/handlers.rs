use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::models::ListeningRecord;

use super::ApiState;

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Welcome message pointing at the data endpoint
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the music data API! Fetch /music-data for the listening records."
    }))
}

/// Returns every available listening record
pub async fn music_data(State(state): State<ApiState>) -> Json<Vec<ListeningRecord>> {
    Json(state.dataset.records().to_vec())
}
