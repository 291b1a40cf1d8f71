//! Catalog listing and single-photo retrieval.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use darkroom_core::{AppError, PhotoCategory, PhotoFilter, PhotoResponse};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Listing filters. `category=all` disables the category filter; hidden
/// photos only appear when `visible=false` is asked for explicitly.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PhotoListQuery {
    /// Category name, or "all"
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// Defaults to true: public listings never leak hidden photos
    pub visible: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PhotoListQuery {
    fn into_filter(self) -> Result<PhotoFilter, AppError> {
        let category = match self.category.as_deref() {
            None => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(
                raw.parse::<PhotoCategory>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
        };

        if self.limit.is_some_and(|l| l < 0) || self.offset.is_some_and(|o| o < 0) {
            return Err(AppError::Validation(
                "limit and offset must not be negative".to_string(),
            ));
        }

        Ok(PhotoFilter {
            visible: Some(self.visible.unwrap_or(true)),
            featured: self.featured,
            category,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// List catalog entries, newest upload first.
#[utoipa::path(
    get,
    path = "/api/v0/photos",
    tag = "photos",
    params(PhotoListQuery),
    responses(
        (status = 200, description = "Matching photos", body = [PhotoResponse]),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhotoListQuery>,
) -> Result<Json<Vec<PhotoResponse>>, HttpAppError> {
    let filter = query.into_filter()?;
    let photos = state.catalog.list(&filter).await?;
    let responses = photos
        .into_iter()
        .map(|photo| photo.into_response(API_PREFIX))
        .collect();
    Ok(Json(responses))
}

/// Fetch a single catalog entry.
#[utoipa::path(
    get,
    path = "/api/v0/photos/{id}",
    tag = "photos",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "The photo", body = PhotoResponse),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    )
)]
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoResponse>, HttpAppError> {
    let photo = state
        .catalog
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;
    Ok(Json(photo.into_response(API_PREFIX)))
}
