//! Route configuration and setup.
//!
//! Photo endpoints live in [photos](photos); health probes in
//! [health](health). Local asset storage is additionally exposed as a
//! static file tree so published asset URLs resolve without a CDN.

mod health;
mod photos;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use darkroom_core::{Config, StorageBackend};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let cors = setup_cors(&state.config);

    // The limit layer guards the whole multipart body; the headroom over
    // the file ceiling leaves room for the other form parts, so oversize
    // files are rejected by the validator with the structured 413 body.
    let body_limit = state.config.max_upload_size_bytes.saturating_mul(2);

    let serve_local_assets = state.config.storage_backend == StorageBackend::Local;
    let local_storage_path = state.config.local_storage_path.clone();

    let mut router = public_routes(state.clone()).merge(photos::photo_routes(state));

    if serve_local_assets {
        router = router.nest_service("/assets", ServeDir::new(local_storage_path));
    }

    router
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    }
}

/// Routes that sit outside the versioned API: health probes and the
/// OpenAPI document.
fn public_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .route(
            "/live",
            get({
                let state = state.clone();
                move || async { health::liveness_check(state).await }
            }),
        )
        .route(
            "/ready",
            get(move || async { health::readiness_check(state).await }),
        )
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}
