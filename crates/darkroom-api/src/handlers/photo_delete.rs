//! Photo deletion.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use darkroom_core::AppError;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete a catalog entry and revoke its published assets.
///
/// Revocation is best effort: the catalog row is already gone, so a
/// failed revoke only leaves an unreferenced file behind.
#[utoipa::path(
    delete,
    path = "/api/v0/photos/{id}",
    tag = "photos",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_photo"))]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let photo = state
        .catalog
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    for asset_id in [
        &photo.original_asset_id,
        &photo.processed_asset_id,
        &photo.thumbnail_asset_id,
    ] {
        if let Err(e) = state.assets.revoke(asset_id).await {
            tracing::warn!(
                error = %e,
                asset_id = %asset_id,
                photo_id = %id,
                "Failed to revoke asset during delete"
            );
        }
    }

    tracing::info!(photo_id = %id, title = %photo.title, "Photo deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}
