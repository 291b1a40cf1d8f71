//! Darkroom Storage Library
//!
//! This crate provides the asset publishing abstraction and its backends.
//! The `AssetStore` trait covers folder provisioning, publishing, revocation,
//! and streaming reads; implementations exist for the local filesystem and S3.
//!
//! # Asset key format
//!
//! Asset ids are storage keys of the form `{category}/{folder}/{filename}`
//! (prefixed with the configured key prefix on S3). Keys must not contain
//! `..` or a leading `/`.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_asset_store;
pub use local::LocalAssetStore;
pub use s3::S3AssetStore;
pub use traits::{
    AssetDownload, AssetKind, AssetMetadata, AssetStore, ByteStream, FolderId, FolderSet,
    PublishedAsset, StorageError, StorageResult,
};
