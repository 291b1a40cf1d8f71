use crate::keys::content_type_for_key;
use crate::traits::{
    AssetDownload, AssetMetadata, AssetStore, FolderId, FolderSet, PublishedAsset, StorageError,
    StorageResult,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem asset store
///
/// Folders are directories under the configured root; public URLs point at
/// the application's own asset retrieval route.
#[derive(Clone)]
pub struct LocalAssetStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalAssetStore {
    /// Create a new LocalAssetStore rooted at `base_path`.
    ///
    /// # Arguments
    /// * `base_path` - Root directory for asset storage (e.g., "./data/assets")
    /// * `public_base_url` - Base URL the server is reachable at (e.g., "http://localhost:3000")
    pub async fn new(
        base_path: impl Into<PathBuf>,
        public_base_url: String,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create asset directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalAssetStore {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert an asset key to a filesystem path with security validation
    ///
    /// Keys with path traversal sequences that could escape the base
    /// directory are rejected.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Asset key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    /// Generate public URL for an asset
    fn generate_url(&self, key: &str) -> String {
        format!("{}/assets/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn ensure_folder_hierarchy(&self, category: &str) -> StorageResult<FolderSet> {
        // The category becomes a path component, so it gets the same
        // validation as a full key.
        self.key_to_path(category)?;

        let set = FolderSet {
            originals: FolderId(format!("{}/originals", category)),
            processed: FolderId(format!("{}/processed", category)),
            thumbnails: FolderId(format!("{}/thumbnails", category)),
        };

        for folder in [&set.originals, &set.processed, &set.thumbnails] {
            let path = self.key_to_path(folder.as_str())?;
            if !fs::try_exists(&path).await.unwrap_or(false) {
                fs::create_dir_all(&path).await.map_err(|e| {
                    StorageError::BackendError(format!(
                        "Failed to create folder {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::debug!(folder = %folder, "Created asset folder");
            }
        }

        Ok(set)
    }

    async fn publish(
        &self,
        folder: &FolderId,
        filename: &str,
        _content_type: &str,
        data: Bytes,
        metadata: &AssetMetadata,
    ) -> StorageResult<PublishedAsset> {
        let key = format!("{}/{}", folder.as_str(), filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::PublishFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::PublishFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::PublishFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            key = %key,
            photo_id = %metadata.photo_id,
            kind = %metadata.kind,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local asset published"
        );

        Ok(PublishedAsset { id: key, url })
    }

    async fn revoke(&self, asset_id: &str) -> StorageResult<()> {
        let path = self.key_to_path(asset_id)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(asset_id.to_string()));
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::RevokeFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(key = %asset_id, "Local asset revoked");

        Ok(())
    }

    async fn download_stream(&self, asset_id: &str) -> StorageResult<AssetDownload> {
        let path = self.key_to_path(asset_id)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(asset_id.to_string()));
        }

        let meta = fs::metadata(&path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let stream = tokio_util::io::ReaderStream::new(file).map(|result| {
            result.map_err(|e| StorageError::DownloadFailed(format!("Failed to read chunk: {}", e)))
        });

        Ok(AssetDownload {
            content_length: meta.len(),
            content_type: content_type_for_key(asset_id),
            stream: Box::pin(stream),
        })
    }

    fn backend_type(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::AssetKind;
    use chrono::Utc;
    use futures::StreamExt;
    use tempfile::tempdir;
    use uuid::Uuid;

    async fn test_store(dir: &std::path::Path) -> LocalAssetStore {
        LocalAssetStore::new(dir, "http://localhost:3000".to_string())
            .await
            .unwrap()
    }

    fn test_metadata() -> AssetMetadata {
        AssetMetadata {
            photo_id: Uuid::new_v4(),
            kind: AssetKind::Original,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_folder_hierarchy_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = test_store(dir.path()).await;

        let first = store.ensure_folder_hierarchy("landscape").await.unwrap();
        let second = store.ensure_folder_hierarchy("landscape").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.originals.as_str(), "landscape/originals");
        assert_eq!(first.processed.as_str(), "landscape/processed");
        assert_eq!(first.thumbnails.as_str(), "landscape/thumbnails");

        assert!(dir.path().join("landscape/originals").is_dir());
        assert!(dir.path().join("landscape/processed").is_dir());
        assert!(dir.path().join("landscape/thumbnails").is_dir());
    }

    #[tokio::test]
    async fn test_publish_and_download_roundtrip() {
        let dir = tempdir().unwrap();
        let store = test_store(dir.path()).await;

        let folders = store.ensure_folder_hierarchy("wildlife").await.unwrap();
        let data = Bytes::from_static(b"jpeg bytes here");

        let asset = store
            .publish(
                &folders.originals,
                "photo.jpg",
                "image/jpeg",
                data.clone(),
                &test_metadata(),
            )
            .await
            .unwrap();

        assert_eq!(asset.id, "wildlife/originals/photo.jpg");
        assert_eq!(
            asset.url,
            "http://localhost:3000/assets/wildlife/originals/photo.jpg"
        );

        let download = store.download_stream(&asset.id).await.unwrap();
        assert_eq!(download.content_length, data.len() as u64);
        assert_eq!(download.content_type, "image/jpeg");

        let mut stream = download.stream;
        let mut downloaded = Vec::new();
        while let Some(chunk) = stream.next().await {
            downloaded.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = test_store(dir.path()).await;

        let result = store.download_stream("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.revoke("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.ensure_folder_hierarchy("../escape").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_revoke_removes_asset() {
        let dir = tempdir().unwrap();
        let store = test_store(dir.path()).await;

        let folders = store.ensure_folder_hierarchy("macro").await.unwrap();
        let asset = store
            .publish(
                &folders.thumbnails,
                "photo_thumb.jpg",
                "image/jpeg",
                Bytes::from_static(b"thumb"),
                &test_metadata(),
            )
            .await
            .unwrap();

        store.revoke(&asset.id).await.unwrap();
        assert!(!dir.path().join(&asset.id).exists());

        // Revoking again reports the asset missing
        let result = store.revoke(&asset.id).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_download_missing_asset() {
        let dir = tempdir().unwrap();
        let store = test_store(dir.path()).await;

        let result = store.download_stream("street/originals/nope.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
