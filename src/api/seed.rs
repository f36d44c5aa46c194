use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::CreatedUser;
use crate::seed::{SeedBatch, SeedRequest};

#[derive(Serialize)]
pub struct ActionResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Deserialize, Default)]
pub struct TestUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct TestUserResponse {
    pub status: &'static str,
    pub message: String,
    pub user: CreatedUser,
}

/// POST /api/reset
/// Drop the schema and replay the initialization migrations (baseline
/// fixtures included). The response is only sent once the replay finishes.
pub async fn reset_database(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    state
        .store
        .reset()
        .await
        .map_err(|e| ApiError::Reset(format!("{e:#}")))?;

    Ok(Json(ActionResponse {
        status: "success",
        message: "Database reset with baseline data".to_string(),
    }))
}

/// POST /api/seed
/// Wipe and repopulate every owned table inside one transaction. Counts come
/// from the optional request body, falling back to the `[seed]` config.
pub async fn seed_database(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SeedRequest>>,
) -> Result<Json<ActionResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let options = state.config.seed.options().with_request(&request);

    let batch = SeedBatch::generate(options);

    state
        .store
        .reseed(&batch)
        .await
        .map_err(|e| ApiError::Seed(format!("{e:#}")))?;

    tracing::info!(
        users = options.user_count,
        bundles = options.bundle_count,
        experiences = options.experience_count,
        "Database reseeded"
    );

    Ok(Json(ActionResponse {
        status: "success",
        message: format!(
            "Database seeded with {} users, {} bundles, {} experiences",
            options.user_count, options.bundle_count, options.experience_count
        ),
    }))
}

/// POST /api/seed/test-user
/// Additive: creates exactly one user with predictable credentials plus one
/// payment method, leaving everything else untouched.
pub async fn create_test_user(
    State(state): State<Arc<AppState>>,
    body: Option<Json<TestUserRequest>>,
) -> Result<Json<TestUserResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let user = state
        .store
        .create_test_user(request.email, request.password)
        .await
        .map_err(|e| ApiError::Seed(format!("{e:#}")))?;

    Ok(Json(TestUserResponse {
        status: "success",
        message: "Test user created".to_string(),
        user,
    }))
}
