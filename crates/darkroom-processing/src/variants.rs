//! Variant generation - the per-upload image pipeline.

use crate::compression::JpegCompressor;
use crate::error::ProcessError;
use crate::image::{ImageOrientation, ImageProcessor, ImageResize, WatermarkRenderer};
use bytes::Bytes;

/// Tunables for variant generation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub processed_max_width: u32,
    pub processed_max_height: u32,
    pub jpeg_quality: u8,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub thumbnail_jpeg_quality: u8,
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            processed_max_width: 3200,
            processed_max_height: 2400,
            jpeg_quality: 75,
            thumbnail_width: 400,
            thumbnail_height: 300,
            thumbnail_jpeg_quality: 80,
            default_width: 3200,
            default_height: 2400,
        }
    }
}

/// The three renditions produced for every accepted upload, plus the
/// dimensions recorded for the photo.
pub struct VariantSet {
    pub original: Bytes,
    pub processed: Bytes,
    pub thumbnail: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Turns upload bytes into the original/processed/thumbnail variant set.
pub struct VariantGenerator {
    config: PipelineConfig,
    watermark: WatermarkRenderer,
}

impl VariantGenerator {
    pub fn new(config: PipelineConfig, watermark: WatermarkRenderer) -> Self {
        Self { config, watermark }
    }

    /// Produce all variants from upload bytes.
    ///
    /// The original bytes pass through untouched. A decode failure aborts
    /// the whole upload; an unreadable dimension header falls back to the
    /// configured defaults; a watermark failure falls back to the
    /// unwatermarked master.
    pub fn generate(&self, data: Bytes) -> Result<VariantSet, ProcessError> {
        // Recorded dimensions come from the original file header, not the
        // resized master.
        let (mut width, mut height) = match ImageProcessor::probe_dimensions(&data) {
            Ok(dims) => dims,
            Err(err) => {
                tracing::warn!(error = %err, "Cannot probe image dimensions, using defaults");
                (self.config.default_width, self.config.default_height)
            }
        };

        let img = ImageProcessor::decode(&data)?;

        let orientation = ImageProcessor::read_exif_orientation(&data);
        let img = ImageOrientation::apply(img, orientation);
        if ImageProcessor::orientation_swaps_axes(orientation) {
            std::mem::swap(&mut width, &mut height);
        }

        let resized = ImageResize::fit_within(
            &img,
            self.config.processed_max_width,
            self.config.processed_max_height,
        );

        let master = if self.watermark.is_enabled() {
            match self.watermark.apply(&resized) {
                Ok(watermarked) => watermarked,
                Err(err) => {
                    tracing::warn!(error = %err, "Watermark failed, keeping unwatermarked master");
                    resized
                }
            }
        } else {
            resized
        };

        let processed = JpegCompressor::compress(&master, self.config.jpeg_quality)?;

        // Thumbnails crop the watermarked master so previews carry the mark.
        let thumb = ImageResize::fill_crop(
            &master,
            self.config.thumbnail_width,
            self.config.thumbnail_height,
        );
        let thumbnail = JpegCompressor::compress(&thumb, self.config.thumbnail_jpeg_quality)?;

        tracing::debug!(
            width = width,
            height = height,
            original_bytes = data.len(),
            processed_bytes = processed.len(),
            thumbnail_bytes = thumbnail.len(),
            "Generated image variants"
        );

        Ok(VariantSet {
            original: data,
            processed,
            thumbnail,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::WatermarkConfig;
    use image::{GenericImageView, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            processed_max_width: 320,
            processed_max_height: 240,
            jpeg_quality: 75,
            thumbnail_width: 40,
            thumbnail_height: 30,
            thumbnail_jpeg_quality: 80,
            default_width: 320,
            default_height: 240,
        }
    }

    fn test_generator() -> VariantGenerator {
        VariantGenerator::new(
            test_config(),
            WatermarkRenderer::from_config(WatermarkConfig::default()),
        )
    }

    fn create_test_png(width: u32, height: u32) -> Bytes {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    #[test]
    fn test_generate_produces_three_variants() {
        let data = create_test_png(800, 600);
        let variants = test_generator().generate(data.clone()).unwrap();

        // Original bytes pass through untouched
        assert_eq!(variants.original, data);

        // Processed and thumbnail are JPEG
        assert_eq!(&variants.processed[..2], &[0xFF, 0xD8]);
        assert_eq!(&variants.thumbnail[..2], &[0xFF, 0xD8]);

        // Recorded dimensions are the original's, not the master's
        assert_eq!((variants.width, variants.height), (800, 600));

        let processed = image::load_from_memory(&variants.processed).unwrap();
        assert_eq!(processed.dimensions(), (320, 240));

        let thumbnail = image::load_from_memory(&variants.thumbnail).unwrap();
        assert_eq!(thumbnail.dimensions(), (40, 30));
    }

    #[test]
    fn test_generate_does_not_upscale_small_images() {
        let data = create_test_png(100, 80);
        let variants = test_generator().generate(data).unwrap();

        assert_eq!((variants.width, variants.height), (100, 80));

        let processed = image::load_from_memory(&variants.processed).unwrap();
        assert_eq!(processed.dimensions(), (100, 80));

        // Thumbnail is still cropped to its fixed size
        let thumbnail = image::load_from_memory(&variants.thumbnail).unwrap();
        assert_eq!(thumbnail.dimensions(), (40, 30));
    }

    #[test]
    fn test_generate_bounds_portrait_images() {
        let data = create_test_png(600, 800);
        let variants = test_generator().generate(data).unwrap();

        assert_eq!((variants.width, variants.height), (600, 800));

        // Height binds: 800 -> 240, width follows the aspect ratio
        let processed = image::load_from_memory(&variants.processed).unwrap();
        assert_eq!(processed.dimensions(), (180, 240));
    }

    #[test]
    fn test_generate_rejects_undecodable_data() {
        let result = test_generator().generate(Bytes::from_static(b"not an image at all"));
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[test]
    fn test_generate_without_watermark_font_still_succeeds() {
        // No font configured: the master is published unwatermarked
        let generator = test_generator();
        let data = create_test_png(400, 300);
        let variants = generator.generate(data).unwrap();
        assert!(!variants.processed.is_empty());
        assert!(!variants.thumbnail.is_empty());
    }
}
