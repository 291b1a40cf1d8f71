//! Darkroom Processing Library
//!
//! Pure image computation for the upload pipeline: decode, orientation
//! normalization, bounded resize, text watermark, progressive JPEG encode,
//! and thumbnail generation. No I/O happens here; callers hand in bytes and
//! get bytes back.

pub mod compression;
pub mod error;
pub mod image;
pub mod validator;
pub mod variants;

pub use compression::JpegCompressor;
pub use error::ProcessError;
pub use self::image::processor::ImageProcessor;
pub use self::image::resize::ImageResize;
pub use self::image::watermark::{WatermarkConfig, WatermarkRenderer};
pub use validator::{UploadValidator, ValidationError};
pub use variants::{PipelineConfig, VariantGenerator, VariantSet};
