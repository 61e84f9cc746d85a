use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use repostats_core::AnalysisResponse;
use serde_json::{json, Value};

use crate::AppState;

pub type ApiError = (StatusCode, Json<Value>);

pub async fn get_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    match tokio::task::spawn_blocking(move || state.pipeline.run()).await {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(err)) => {
            tracing::error!("pipeline failed: {err}");
            Err(internal_error(err.to_string()))
        }
        Err(err) => {
            tracing::error!("pipeline task aborted: {err}");
            Err(internal_error("pipeline task aborted".to_string()))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn internal_error(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}
