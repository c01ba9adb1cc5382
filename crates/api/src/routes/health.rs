use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use agenda_core::errors::AgendaError;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// Connectivity probe against the store, for diagnosing a misconfigured or
// unreachable database without loading a board.
async fn db_health(State(state): State<Arc<ApiState>>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .map_err(|err| AppError(AgendaError::Database(eyre::Report::new(err))))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(db_health))
        .route("/version", get(version))
}
