//! Photo upload pipeline.

mod service;
mod types;

pub use service::PhotoUploadService;
pub use types::{PhotoForm, UploadStage, UploadedFile};
