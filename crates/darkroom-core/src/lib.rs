//! Darkroom Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Darkroom components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{CatalogBackend, Config, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::photo::{
    NewPhoto, Photo, PhotoCategory, PhotoFilter, PhotoResponse, UpdatePhotoRequest, UploadResponse,
};
