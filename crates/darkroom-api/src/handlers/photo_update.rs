//! Partial photo updates.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use darkroom_core::{AppError, PhotoResponse, UpdatePhotoRequest};
use uuid::Uuid;
use validator::Validate;

use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Partially update a catalog entry. Absent fields are left untouched.
#[utoipa::path(
    put,
    path = "/api/v0/photos/{id}",
    tag = "photos",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "The updated photo", body = PhotoResponse),
        (status = 400, description = "Invalid update payload", body = ErrorResponse),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(operation = "update_photo"))]
pub async fn update_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<UpdatePhotoRequest>,
) -> Result<Json<PhotoResponse>, HttpAppError> {
    update.validate().map_err(AppError::from)?;

    if update.is_empty() {
        return Err(AppError::Validation("No fields provided to update".to_string()).into());
    }

    if update.price.is_some_and(|p| p.is_sign_negative()) {
        return Err(AppError::Validation("Price must not be negative".to_string()).into());
    }

    let photo = state
        .catalog
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    tracing::info!(photo_id = %id, "Photo updated");
    Ok(Json(photo.into_response(API_PREFIX)))
}
