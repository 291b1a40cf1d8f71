//! HTTP request handlers.

pub mod photo_delete;
pub mod photo_download;
pub mod photo_get;
pub mod photo_update;
pub mod photo_upload;
