use crate::catalog::Catalog;
use async_trait::async_trait;
use chrono::Utc;
use darkroom_core::{AppError, NewPhoto, Photo, PhotoFilter, UpdatePhotoRequest};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory photo catalog
///
/// Backs integration tests and database-less development. Mirrors the
/// Postgres semantics: partial updates leave absent fields untouched and
/// listing sorts newest upload first.
#[derive(Default)]
pub struct MemoryCatalog {
    photos: RwLock<HashMap<Uuid, Photo>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn insert(&self, photo: NewPhoto) -> Result<Photo, AppError> {
        let now = Utc::now();
        let row = Photo {
            photo_id: photo.photo_id,
            filename: photo.filename,
            title: photo.title,
            description: photo.description,
            category: photo.category,
            tags: photo.tags,
            featured: photo.featured,
            visible: photo.visible,
            price: photo.price,
            licensing_available: photo.licensing_available,
            width: photo.width,
            height: photo.height,
            original_size_mb: photo.original_size_mb,
            processed_size_mb: photo.processed_size_mb,
            storage_path: photo.storage_path,
            original_asset_id: photo.original_asset_id,
            processed_asset_id: photo.processed_asset_id,
            thumbnail_asset_id: photo.thumbnail_asset_id,
            location: None,
            date_taken: None,
            notes: None,
            uploaded_at: now,
            updated_at: now,
        };

        self.photos.write().await.insert(row.photo_id, row.clone());
        Ok(row)
    }

    async fn list(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        let photos = self.photos.read().await;
        let mut matching: Vec<Photo> = photos
            .values()
            .filter(|p| filter.visible.map_or(true, |v| p.visible == v))
            .filter(|p| filter.featured.map_or(true, |f| p.featured == f))
            .filter(|p| filter.category.map_or(true, |c| p.category == c))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let limit = filter
            .limit
            .map(|l| l.max(0) as usize)
            .unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn get(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError> {
        Ok(self.photos.read().await.get(&photo_id).cloned())
    }

    async fn update(
        &self,
        photo_id: Uuid,
        update: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, AppError> {
        let mut photos = self.photos.write().await;
        let photo = match photos.get_mut(&photo_id) {
            Some(photo) => photo,
            None => return Ok(None),
        };

        if let Some(title) = &update.title {
            photo.title = title.clone();
        }
        if let Some(description) = &update.description {
            photo.description = description.clone();
        }
        if let Some(category) = update.category {
            photo.category = category;
        }
        if let Some(tags) = &update.tags {
            photo.tags = tags.clone();
        }
        if let Some(featured) = update.featured {
            photo.featured = featured;
        }
        if let Some(visible) = update.visible {
            photo.visible = visible;
        }
        if let Some(price) = update.price {
            photo.price = price;
        }
        if let Some(licensing) = update.licensing_available {
            photo.licensing_available = licensing;
        }
        if let Some(location) = &update.location {
            photo.location = Some(location.clone());
        }
        if let Some(date_taken) = update.date_taken {
            photo.date_taken = Some(date_taken);
        }
        if let Some(notes) = &update.notes {
            photo.notes = Some(notes.clone());
        }
        photo.updated_at = Utc::now();

        Ok(Some(photo.clone()))
    }

    async fn delete(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError> {
        Ok(self.photos.write().await.remove(&photo_id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
