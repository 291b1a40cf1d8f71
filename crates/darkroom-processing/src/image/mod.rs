//! Image processing module
//!
//! This module provides the image operations the upload pipeline composes:
//! - Decode, dimension probe, and EXIF orientation reading (processor)
//! - Rotation and flip correction (orientation)
//! - Bounded resize and thumbnail cropping (resize)
//! - Text watermark overlay (watermark)

pub mod orientation;
pub mod processor;
pub mod resize;
pub mod watermark;

pub use orientation::ImageOrientation;
pub use processor::ImageProcessor;
pub use resize::ImageResize;
pub use watermark::{WatermarkConfig, WatermarkRenderer};
