//! Photo upload endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use darkroom_core::{AppError, UploadResponse};

use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_photo_form;

/// Upload a photo and run it through the processing pipeline.
///
/// Expects a multipart form with a `file` part plus optional `title`,
/// `description`, `category`, `tags`, `featured`, and `price` parts.
/// Responds once all three renditions are published and cataloged.
#[utoipa::path(
    post,
    path = "/api/v0/photos",
    tag = "photos",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo processed, published, and cataloged", body = UploadResponse),
        (status = 400, description = "Missing file part or invalid form data", body = ErrorResponse),
        (status = 413, description = "File exceeds the upload size limit"),
        (status = 500, description = "Decode, processing, publish, or catalog failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photo"))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut form = extract_photo_form(multipart).await?;
    let file = form.file.take().ok_or_else(|| {
        AppError::Validation("No file provided; send a multipart part named 'file'".to_string())
    })?;

    let photo = state.uploader.upload(file, form).await?;

    Ok(Json(UploadResponse {
        success: true,
        photo: photo.into_response(API_PREFIX),
    }))
}
