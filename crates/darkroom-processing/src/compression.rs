use bytes::Bytes;
use image::DynamicImage;

use crate::error::ProcessError;

/// Progressive JPEG encoder for published renditions.
///
/// Uses mozjpeg with optimized coding so processed images and thumbnails
/// load incrementally in galleries.
pub struct JpegCompressor;

impl JpegCompressor {
    /// Encode to progressive JPEG at the given quality (0-100).
    pub fn compress(img: &DynamicImage, quality: u8) -> Result<Bytes, ProcessError> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        comp.write_scanlines(&rgb_img)
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        let jpeg_data = comp
            .finish()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;

        Ok(Bytes::from(jpeg_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Scan JPEG markers for SOF2 (0xFFC2), the progressive DCT frame header.
    fn is_progressive_jpeg(data: &[u8]) -> bool {
        let mut i = 2; // skip SOI
        while i + 3 < data.len() {
            if data[i] != 0xFF {
                return false;
            }
            let marker = data[i + 1];
            if marker == 0xC2 {
                return true;
            }
            if marker == 0xDA {
                // Start of scan: frame header must have appeared before this
                return false;
            }
            let len = ((data[i + 2] as usize) << 8) | data[i + 3] as usize;
            i += 2 + len;
        }
        false
    }

    #[test]
    fn test_compress_produces_jpeg_magic() {
        let img = create_test_image(64, 48);
        let data = JpegCompressor::compress(&img, 80).unwrap();
        assert!(data.len() > 4);
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_compress_is_progressive() {
        let img = create_test_image(128, 96);
        let data = JpegCompressor::compress(&img, 75).unwrap();
        assert!(is_progressive_jpeg(&data), "expected SOF2 marker");
    }

    #[test]
    fn test_output_decodes_to_same_dimensions() {
        let img = create_test_image(123, 77);
        let data = JpegCompressor::compress(&img, 85).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.width(), 123);
        assert_eq!(decoded.height(), 77);
    }

    #[test]
    fn test_higher_quality_is_larger() {
        let img = create_test_image(256, 256);
        let low = JpegCompressor::compress(&img, 75).unwrap();
        let high = JpegCompressor::compress(&img, 90).unwrap();
        assert!(high.len() > low.len());
    }
}
