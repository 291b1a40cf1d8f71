use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> image::imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            image::imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        }
    }

    /// Shrink an image to fit inside a bounding box, preserving aspect ratio.
    ///
    /// Images already inside the box are returned unchanged; this never
    /// upscales.
    pub fn fit_within(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();

        if orig_width <= max_width && orig_height <= max_height {
            return img.clone();
        }

        let scale_width = max_width as f32 / orig_width as f32;
        let scale_height = max_height as f32 / orig_height as f32;
        let scale = scale_width.min(scale_height);

        let new_width = ((orig_width as f32 * scale).round() as u32)
            .clamp(1, max_width);
        let new_height = ((orig_height as f32 * scale).round() as u32)
            .clamp(1, max_height);

        let filter = Self::select_filter(orig_width, orig_height, new_width, new_height);
        img.resize_exact(new_width, new_height, filter)
    }

    /// Resize to exactly `width` x `height`, scaling to cover and cropping
    /// the overflow from the center.
    pub fn fill_crop(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_to_fill(width, height, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops::FilterType;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn solid_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 0, 0, 255]),
        ))
    }

    #[test]
    fn test_select_filter_by_ratio() {
        // Large downscale uses Triangle
        assert!(matches!(
            ImageResize::select_filter(4000, 3000, 400, 300),
            FilterType::Triangle
        ));

        // Moderate downscale uses CatmullRom
        assert!(matches!(
            ImageResize::select_filter(400, 300, 220, 165),
            FilterType::CatmullRom
        ));

        // Small downscale uses Lanczos3
        assert!(matches!(
            ImageResize::select_filter(400, 300, 390, 290),
            FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let img = solid_image(100, 80);
        let fitted = ImageResize::fit_within(&img, 3200, 2400);
        assert_eq!(fitted.dimensions(), (100, 80));
    }

    #[test]
    fn test_fit_within_at_exact_bound() {
        let img = solid_image(3200, 2400);
        let fitted = ImageResize::fit_within(&img, 3200, 2400);
        assert_eq!(fitted.dimensions(), (3200, 2400));
    }

    #[test]
    fn test_fit_within_downscales_landscape() {
        let img = solid_image(6000, 4000);
        let fitted = ImageResize::fit_within(&img, 3200, 2400);
        // Width binds: 6000 -> 3200, height follows the aspect ratio
        assert_eq!(fitted.dimensions(), (3200, 2133));
    }

    #[test]
    fn test_fit_within_downscales_portrait() {
        let img = solid_image(4000, 6000);
        let fitted = ImageResize::fit_within(&img, 3200, 2400);
        // Height binds: 6000 -> 2400, width follows the aspect ratio
        assert_eq!(fitted.dimensions(), (1600, 2400));
    }

    #[test]
    fn test_fill_crop_landscape() {
        let img = solid_image(1600, 900);
        let cropped = ImageResize::fill_crop(&img, 400, 300);
        assert_eq!(cropped.dimensions(), (400, 300));
    }

    #[test]
    fn test_fill_crop_portrait() {
        let img = solid_image(900, 1600);
        let cropped = ImageResize::fill_crop(&img, 400, 300);
        assert_eq!(cropped.dimensions(), (400, 300));
    }
}
