//! Catalog abstraction
//!
//! The catalog holds one row per published photo. Backends are selected at
//! startup and injected; handlers and services only see this trait.

use async_trait::async_trait;
use darkroom_core::{AppError, NewPhoto, Photo, PhotoFilter, UpdatePhotoRequest};
use uuid::Uuid;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert a new photo, returning the stored row.
    async fn insert(&self, photo: NewPhoto) -> Result<Photo, AppError>;

    /// List photos matching the filter, newest upload first.
    async fn list(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError>;

    /// Fetch one photo by id.
    async fn get(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError>;

    /// Apply a partial update, returning the updated row.
    async fn update(
        &self,
        photo_id: Uuid,
        update: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, AppError>;

    /// Delete a photo, returning the deleted row so callers can revoke
    /// its published assets.
    async fn delete(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
