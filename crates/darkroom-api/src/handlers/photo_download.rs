//! Streams photo renditions from the asset store.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use darkroom_core::AppError;
use futures::StreamExt;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Rendition selector. Originals are never served; the watermarked
/// renditions are the public surface.
#[derive(Debug, Deserialize, IntoParams)]
pub struct FileQuery {
    /// "thumb" for the thumbnail, anything else for the processed image
    pub size: Option<String>,
}

/// Stream a photo rendition.
///
/// Renditions are immutable once published (re-uploads mint a new photo
/// id), so responses carry a one-year immutable cache policy.
#[utoipa::path(
    get,
    path = "/api/v0/photos/{id}/file",
    tag = "photos",
    params(
        ("id" = Uuid, Path, description = "Photo ID"),
        FileQuery
    ),
    responses(
        (status = 200, description = "Photo bytes", content_type = "image/jpeg"),
        (status = 404, description = "Photo or asset not found", body = ErrorResponse)
    )
)]
pub async fn download_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<FileQuery>,
) -> Result<Response, HttpAppError> {
    let photo = state
        .catalog
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    let asset_id = match query.size.as_deref() {
        Some("thumb") => &photo.thumbnail_asset_id,
        _ => &photo.processed_asset_id,
    };

    tracing::debug!(photo_id = %id, asset_id = %asset_id, "Streaming photo rendition");

    let download = state.assets.download_stream(asset_id).await?;

    let body_stream = download.stream.map(|chunk| {
        chunk.map_err(|e| std::io::Error::other(format!("Asset stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.content_type)
        .header(header::CONTENT_LENGTH, download.content_length)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", photo.filename),
        )
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build streaming response");
            HttpAppError(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
