//! Asset store abstraction
//!
//! This module defines the AssetStore trait that all publishing backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use darkroom_core::AppError;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Publish failed: {0}")]
    PublishFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Revoke failed: {0}")]
    RevokeFailed(String),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => AppError::NotFound(what),
            StorageError::DownloadFailed(msg) => AppError::Internal(msg),
            other => AppError::Publish(other.to_string()),
        }
    }
}

/// Identifier of a provisioned folder: a directory for the local backend,
/// a key prefix for S3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderId(pub String);

impl FolderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The folder trio provisioned for one photo category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSet {
    pub originals: FolderId,
    pub processed: FolderId,
    pub thumbnails: FolderId,
}

/// Which rendition of a photo an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Original,
    Processed,
    Thumbnail,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Original => "original",
            AssetKind::Processed => "processed",
            AssetKind::Thumbnail => "thumbnail",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every published asset.
#[derive(Debug, Clone)]
pub struct AssetMetadata {
    pub photo_id: Uuid,
    pub kind: AssetKind,
    pub uploaded_at: DateTime<Utc>,
}

/// A successfully published asset: its stable id and public URL.
#[derive(Debug, Clone)]
pub struct PublishedAsset {
    pub id: String,
    pub url: String,
}

/// Stream of asset bytes.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Streaming handle for an asset download.
pub struct AssetDownload {
    pub content_length: u64,
    pub content_type: String,
    pub stream: ByteStream,
}

/// Asset publishing abstraction
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The upload pipeline works against it without coupling to backend
/// details; backends are selected once at startup and injected.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Provision the folder hierarchy for a category:
    /// root -> category -> { originals, processed, thumbnails }.
    ///
    /// Idempotent. Repeated calls for the same category return identical
    /// folder ids and never create duplicates; existing folders are looked
    /// up, not recreated.
    async fn ensure_folder_hierarchy(&self, category: &str) -> StorageResult<FolderSet>;

    /// Write an asset into a folder, publicly readable, tagged with its
    /// photo metadata. Returns the stable asset id and public URL.
    async fn publish(
        &self,
        folder: &FolderId,
        filename: &str,
        content_type: &str,
        data: Bytes,
        metadata: &AssetMetadata,
    ) -> StorageResult<PublishedAsset>;

    /// Remove a published asset. Revoking a missing asset is `NotFound`.
    async fn revoke(&self, asset_id: &str) -> StorageResult<()>;

    /// Open a streaming read of a published asset.
    async fn download_stream(&self, asset_id: &str) -> StorageResult<AssetDownload>;

    /// Backend name for logs
    fn backend_type(&self) -> &'static str;
}
