//! Upload orchestration: validate, generate variants, publish, catalog.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::Utc;
use darkroom_core::{AppError, Config, NewPhoto, Photo};
use darkroom_db::Catalog;
use darkroom_processing::{UploadValidator, VariantGenerator, VariantSet};
use darkroom_storage::{AssetKind, AssetMetadata, AssetStore, FolderId, PublishedAsset};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::utils::upload::{file_extension, sanitize_filename, title_from_filename};

use super::types::{PhotoForm, UploadStage, UploadedFile};

/// Byte counts surface as MB rounded to two decimals, the unit the
/// portfolio frontend displays.
fn bytes_to_mb(bytes: usize) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
}

/// Orchestrates one photo upload end to end.
///
/// Stages run strictly in order: validate, generate the variant set off
/// the async runtime, publish the three renditions, insert the catalog
/// row. The first failure aborts the rest. Assets published before a
/// catalog failure stay behind; the orphaned ids are logged, not rolled
/// back.
pub struct PhotoUploadService {
    config: Arc<Config>,
    catalog: Arc<dyn Catalog>,
    assets: Arc<dyn AssetStore>,
    validator: UploadValidator,
    variants: Arc<VariantGenerator>,
}

impl PhotoUploadService {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<dyn Catalog>,
        assets: Arc<dyn AssetStore>,
        validator: UploadValidator,
        variants: Arc<VariantGenerator>,
    ) -> Self {
        Self {
            config,
            catalog,
            assets,
            validator,
            variants,
        }
    }

    pub async fn upload(&self, file: UploadedFile, form: PhotoForm) -> Result<Photo, AppError> {
        let started = Instant::now();
        tracing::info!(
            stage = %UploadStage::Received,
            filename = %file.filename,
            content_type = %file.content_type,
            size_bytes = file.data.len(),
            "Processing photo upload"
        );

        self.validator
            .validate(&file.data, &file.content_type)
            .map_err(AppError::from)?;

        let photo_id = Uuid::new_v4();
        let filename = sanitize_filename(&file.filename)?;
        let category = form.category.unwrap_or_default();
        tracing::debug!(
            stage = %UploadStage::Validated,
            photo_id = %photo_id,
            category = %category,
            "Upload validated"
        );

        // Folders are provisioned before the heavy pipeline so a publish
        // never races folder creation.
        let folders = self
            .assets
            .ensure_folder_hierarchy(&category.to_string())
            .await?;

        let variants = self.generate_variants(file.data.clone()).await?;
        tracing::debug!(
            stage = %UploadStage::VariantsGenerated,
            photo_id = %photo_id,
            width = variants.width,
            height = variants.height,
            "Variants generated"
        );

        let uploaded_at = Utc::now();
        let extension = file_extension(&filename);

        let original = self
            .publish_with_timeout(
                &folders.originals,
                &format!("{}.{}", photo_id, extension),
                &file.content_type,
                variants.original.clone(),
                &AssetMetadata {
                    photo_id,
                    kind: AssetKind::Original,
                    uploaded_at,
                },
            )
            .await?;
        let processed = self
            .publish_with_timeout(
                &folders.processed,
                &format!("{}_processed.jpg", photo_id),
                "image/jpeg",
                variants.processed.clone(),
                &AssetMetadata {
                    photo_id,
                    kind: AssetKind::Processed,
                    uploaded_at,
                },
            )
            .await?;
        let thumbnail = self
            .publish_with_timeout(
                &folders.thumbnails,
                &format!("{}_thumb.jpg", photo_id),
                "image/jpeg",
                variants.thumbnail.clone(),
                &AssetMetadata {
                    photo_id,
                    kind: AssetKind::Thumbnail,
                    uploaded_at,
                },
            )
            .await?;
        tracing::debug!(
            stage = %UploadStage::AssetsPublished,
            photo_id = %photo_id,
            "Assets published"
        );

        let new_photo = NewPhoto {
            photo_id,
            title: form
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| title_from_filename(&filename)),
            description: form.description.unwrap_or_default(),
            category,
            tags: form.tags,
            featured: form.featured,
            visible: true,
            price: form.price.unwrap_or_else(|| Decimal::new(4999, 2)),
            licensing_available: true,
            width: variants.width as i32,
            height: variants.height as i32,
            original_size_mb: bytes_to_mb(variants.original.len()),
            processed_size_mb: bytes_to_mb(variants.processed.len()),
            storage_path: processed.url.clone(),
            original_asset_id: original.id.clone(),
            processed_asset_id: processed.id.clone(),
            thumbnail_asset_id: thumbnail.id.clone(),
            filename,
        };

        let photo = self.catalog.insert(new_photo).await.map_err(|e| {
            tracing::error!(
                error = %e,
                photo_id = %photo_id,
                original_asset_id = %original.id,
                processed_asset_id = %processed.id,
                thumbnail_asset_id = %thumbnail.id,
                "Catalog insert failed; published assets were not rolled back"
            );
            AppError::CatalogWrite(e.to_string())
        })?;

        tracing::info!(
            stage = %UploadStage::Cataloged,
            photo_id = %photo.photo_id,
            title = %photo.title,
            duration_ms = started.elapsed().as_millis() as u64,
            "Photo upload complete"
        );

        Ok(photo)
    }

    /// Run the CPU-heavy pipeline off the async runtime.
    async fn generate_variants(&self, data: Bytes) -> Result<VariantSet, AppError> {
        let generator = self.variants.clone();
        let variants = tokio::task::spawn_blocking(move || generator.generate(data))
            .await
            .map_err(|e| AppError::Internal(format!("Image pipeline task failed: {}", e)))??;
        Ok(variants)
    }

    async fn publish_with_timeout(
        &self,
        folder: &FolderId,
        filename: &str,
        content_type: &str,
        data: Bytes,
        metadata: &AssetMetadata,
    ) -> Result<PublishedAsset, AppError> {
        let timeout = Duration::from_secs(self.config.publish_timeout_secs);
        match tokio::time::timeout(
            timeout,
            self.assets.publish(folder, filename, content_type, data, metadata),
        )
        .await
        {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Publish(format!(
                "Publishing {} timed out after {}s",
                filename, self.config.publish_timeout_secs
            ))),
        }
    }
}
