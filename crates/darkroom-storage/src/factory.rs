use crate::local::LocalAssetStore;
use crate::s3::S3AssetStore;
use crate::traits::{AssetStore, StorageError, StorageResult};
use darkroom_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create an asset store backend based on configuration
pub async fn create_asset_store(config: &Config) -> StorageResult<Arc<dyn AssetStore>> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;

            let store = S3AssetStore::new(
                bucket,
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
                config.s3_prefix.clone(),
            )
            .await?;

            tracing::info!(backend = store.backend_type(), "Asset store initialized");
            Ok(Arc::new(store))
        }
        StorageBackend::Local => {
            let store = LocalAssetStore::new(
                config.local_storage_path.clone(),
                config.public_base_url.clone(),
            )
            .await?;

            tracing::info!(
                backend = store.backend_type(),
                path = %config.local_storage_path,
                "Asset store initialized"
            );
            Ok(Arc::new(store))
        }
    }
}
