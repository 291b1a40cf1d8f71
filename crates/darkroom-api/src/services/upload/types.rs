//! Upload pipeline data types.

use bytes::Bytes;
use darkroom_core::PhotoCategory;
use rust_decimal::Decimal;

/// One file part extracted from the multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

/// Parsed multipart upload form.
#[derive(Debug, Default)]
pub struct PhotoForm {
    pub file: Option<UploadedFile>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<PhotoCategory>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub price: Option<Decimal>,
}

/// States an upload moves through, in order. Transitions are logged; there
/// are no retries and intermediate states are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Received,
    Validated,
    VariantsGenerated,
    AssetsPublished,
    Cataloged,
}

impl UploadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStage::Received => "received",
            UploadStage::Validated => "validated",
            UploadStage::VariantsGenerated => "variants_generated",
            UploadStage::AssetsPublished => "assets_published",
            UploadStage::Cataloged => "cataloged",
        }
    }
}

impl std::fmt::Display for UploadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
