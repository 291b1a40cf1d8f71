use crate::keys::content_type_for_key;
use crate::traits::{
    AssetDownload, AssetMetadata, AssetStore, FolderId, FolderSet, PublishedAsset, StorageError,
    StorageResult,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult, TagSet,
};

/// S3 asset store
///
/// Folder ids are deterministic key prefixes; S3 has no real directories,
/// so provisioning a hierarchy is a pure key computation. Public read is
/// expected to come from the bucket policy.
#[derive(Clone)]
pub struct S3AssetStore {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    key_prefix: String,
}

impl S3AssetStore {
    /// Create a new S3AssetStore instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `key_prefix` - Prefix every asset key lives under (e.g., "darkroom")
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        key_prefix: String,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3AssetStore {
            store,
            bucket,
            region,
            endpoint_url,
            key_prefix: key_prefix.trim_matches('/').to_string(),
        })
    }

    /// Generate public URL for an S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style URLs from the endpoint
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn ensure_folder_hierarchy(&self, category: &str) -> StorageResult<FolderSet> {
        if category.is_empty() || category.contains('/') || category.contains("..") {
            return Err(StorageError::InvalidKey(format!(
                "Invalid category: {}",
                category
            )));
        }

        let root = if self.key_prefix.is_empty() {
            category.to_string()
        } else {
            format!("{}/{}", self.key_prefix, category)
        };

        Ok(FolderSet {
            originals: FolderId(format!("{}/originals", root)),
            processed: FolderId(format!("{}/processed", root)),
            thumbnails: FolderId(format!("{}/thumbnails", root)),
        })
    }

    async fn publish(
        &self,
        folder: &FolderId,
        filename: &str,
        content_type: &str,
        data: Bytes,
        metadata: &AssetMetadata,
    ) -> StorageResult<PublishedAsset> {
        let key = format!("{}/{}", folder.as_str(), filename);
        let size = data.len() as u64;
        let location = Path::from(key.clone());
        let start = std::time::Instant::now();

        let mut tags = TagSet::default();
        tags.push("photo-id", &metadata.photo_id.to_string());
        tags.push("kind", metadata.kind.as_str());
        tags.push("uploaded-at", &metadata.uploaded_at.to_rfc3339());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let mut opts = PutOptions::default();
        opts.tags = tags;
        opts.attributes = attributes;

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 publish failed"
            );
            StorageError::PublishFailed(e.to_string())
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            photo_id = %metadata.photo_id,
            kind = %metadata.kind,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 asset published"
        );

        Ok(PublishedAsset { id: key, url })
    }

    async fn revoke(&self, asset_id: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(asset_id.to_string());

        // S3 deletes succeed for missing keys; probe first so a missing
        // asset is reported as such.
        let head_result: ObjectResult<_> = self.store.head(&location).await;
        head_result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(asset_id.to_string()),
            other => StorageError::BackendError(other.to_string()),
        })?;

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %asset_id,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 revoke failed"
            );
            StorageError::RevokeFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %asset_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 asset revoked"
        );

        Ok(())
    }

    async fn download_stream(&self, asset_id: &str) -> StorageResult<AssetDownload> {
        let location = Path::from(asset_id.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(asset_id.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %asset_id,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let content_length = result.meta.size;
        let key = asset_id.to_string();
        let stream = result.into_stream().map(move |res| {
            res.map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 stream download error");
                StorageError::DownloadFailed(e.to_string())
            })
        });

        Ok(AssetDownload {
            content_length,
            content_type: content_type_for_key(asset_id),
            stream: Box::pin(stream),
        })
    }

    fn backend_type(&self) -> &'static str {
        "s3"
    }
}
