//! Image fixtures for upload tests.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Gradient JPEG so the encoder has realistic content to chew on.
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    buffer
}

/// Gradient PNG for exercising non-JPEG uploads.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode png fixture");
    buffer
}

/// A payload of the given size that claims to be an image. Size
/// validation fires before decode, so the bytes never need to decode.
pub fn oversized_payload(bytes: usize) -> Vec<u8> {
    vec![0u8; bytes]
}
