use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use super::{
    AppState,
    error::{AppError, AppResult},
};
use crate::core::ProgressRecord;
use crate::storage::PROGRESS_BLOB;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Returns the stored record as-is, or an empty record when none exists.
pub async fn load_progress(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let Some(bytes) = state.blobs.get(PROGRESS_BLOB).await? else {
        return Ok(Json(json!({ "completedDays": [] })));
    };

    let data = serde_json::from_slice::<Value>(&bytes)
        .map_err(|err| AppError::Corrupt(err.to_string()))?;
    Ok(Json(data))
}

pub async fn save_progress(
    State(state): State<AppState>,
    payload: Result<Json<ProgressRecord>, JsonRejection>,
) -> AppResult<Json<SaveResponse>> {
    let Json(payload) = payload?;
    let bytes = serde_json::to_vec(&payload).map_err(|err| AppError::Storage(err.to_string()))?;
    let blob = state.blobs.put(PROGRESS_BLOB, bytes).await?;

    info!(days = payload.completed_days.len(), url = %blob.url, "stored progress blob");
    Ok(Json(SaveResponse {
        success: true,
        url: blob.url,
    }))
}

pub async fn clear_progress(State(state): State<AppState>) -> AppResult<Json<SuccessResponse>> {
    let removed = state.blobs.delete(PROGRESS_BLOB).await?;

    info!(removed, "cleared progress blob");
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
