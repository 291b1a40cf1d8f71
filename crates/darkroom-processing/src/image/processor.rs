//! Image processor - decode, dimension probe, and EXIF orientation

use crate::error::ProcessError;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode image data into pixels, sniffing the format from the bytes.
    pub fn decode(data: &[u8]) -> Result<DynamicImage, ProcessError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessError::Decode(e.to_string()))?;
        reader
            .decode()
            .map_err(|e| ProcessError::Decode(e.to_string()))
    }

    /// Read image dimensions from the file header without decoding pixels.
    pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), ProcessError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessError::MetadataUnavailable(e.to_string()))?;
        reader
            .into_dimensions()
            .map_err(|e| ProcessError::MetadataUnavailable(e.to_string()))
    }

    /// Read the EXIF orientation tag from image data.
    ///
    /// Returns the orientation value (1-8), or 1 (normal) when the image
    /// carries no EXIF, the tag is absent, or the value is out of range.
    pub fn read_exif_orientation(data: &[u8]) -> u8 {
        let mut cursor = Cursor::new(data);
        let exif = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(_) => return 1,
        };

        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .filter(|v| (1..=8).contains(v))
            .map(|v| v as u8)
            .unwrap_or(1)
    }

    /// Get rotation and flip operations needed for a given EXIF orientation
    /// Returns (rotate_angle, flip_horizontal, flip_vertical)
    pub fn get_orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
        match orientation {
            1 => (None, false, false),      // Normal
            2 => (None, true, false),       // Mirror horizontal
            3 => (Some(180), false, false), // Rotate 180
            4 => (None, false, true),       // Mirror vertical
            5 => (Some(90), true, false),   // Transpose
            6 => (Some(90), false, false),  // Rotate 90 CW
            7 => (Some(270), true, false),  // Transverse
            8 => (Some(270), false, false), // Rotate 270 CW
            _ => (None, false, false),      // Invalid, treat as normal
        }
    }

    /// True when correcting the orientation swaps width and height.
    pub fn orientation_swaps_axes(orientation: u8) -> bool {
        (5..=8).contains(&orientation)
    }
}
