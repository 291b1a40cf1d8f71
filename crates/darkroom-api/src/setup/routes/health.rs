//! Health check handlers.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, Json};
use darkroom_storage::StorageError;

use crate::state::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with a timeout; returns "healthy", "timeout", or
/// "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub catalog: String,
    pub storage: String,
}

/// Liveness probe - the process is up.
pub async fn liveness_check(_state: Arc<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the catalog answers.
pub async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.clone();
    let catalog_status = run_check(
        CHECK_TIMEOUT,
        async move { catalog.ping().await },
        "not_ready",
    )
    .await;
    let ready = catalog_status == "healthy";

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "catalog": catalog_status,
        })),
    )
}

/// Full health check: catalog plus asset store reachability.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.clone();
    let catalog_status = run_check(
        CHECK_TIMEOUT,
        async move { catalog.ping().await },
        "unhealthy",
    )
    .await;

    // Probing a key that never exists still exercises the backend;
    // NotFound means it answered.
    let assets = state.assets.clone();
    let storage_status = run_check(
        CHECK_TIMEOUT,
        async move {
            match assets.download_stream("health/probe-missing").await {
                Ok(_) | Err(StorageError::NotFound(_)) => Ok(()),
                Err(e) => Err(e),
            }
        },
        "degraded",
    )
    .await;

    let overall_healthy = catalog_status == "healthy" && storage_status == "healthy";

    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "degraded" }.to_string(),
        catalog: catalog_status,
        storage: storage_status,
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
