use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::TableCounts;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub counts: TableCounts,
}

/// GET /api/status
/// Row counts for the core tables. Read-only.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| ApiError::Connection(format!("{e:#}")))?;

    let counts = state
        .store
        .table_counts()
        .await
        .map_err(|e| ApiError::Connection(format!("{e:#}")))?;

    Ok(Json(StatusResponse {
        status: "connected",
        counts,
    }))
}
