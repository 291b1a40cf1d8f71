use super::processor::ImageProcessor;
use image::{imageops, DynamicImage};

/// Image orientation operations (rotation and flipping)
pub struct ImageOrientation;

impl ImageOrientation {
    /// Correct an image for the given EXIF orientation value.
    ///
    /// Rotation is applied first, then flips, so the output displays
    /// upright regardless of how the camera stored the pixels.
    pub fn apply(mut img: DynamicImage, orientation: u8) -> DynamicImage {
        let (rotate, flip_h, flip_v) = ImageProcessor::get_orientation_transforms(orientation);

        if rotate.is_none() && !flip_h && !flip_v {
            return img;
        }

        tracing::debug!(
            orientation = orientation,
            rotate = ?rotate,
            flip_horizontal = flip_h,
            flip_vertical = flip_v,
            "Applying EXIF orientation"
        );

        if let Some(angle) = rotate {
            img = Self::rotate_by_angle(img, angle);
        }
        if flip_h {
            img = Self::flip_horizontal(img);
        }
        if flip_v {
            img = Self::flip_vertical(img);
        }

        img
    }

    /// Rotate image by specified angle (90, 180, or 270 degrees clockwise)
    pub fn rotate_by_angle(img: DynamicImage, angle: u16) -> DynamicImage {
        match angle {
            90 => DynamicImage::ImageRgba8(imageops::rotate90(&img.to_rgba8())),
            180 => DynamicImage::ImageRgba8(imageops::rotate180(&img.to_rgba8())),
            270 => DynamicImage::ImageRgba8(imageops::rotate270(&img.to_rgba8())),
            _ => img,
        }
    }

    /// Apply horizontal flip (mirror)
    pub fn flip_horizontal(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()))
    }

    /// Apply vertical flip
    pub fn flip_vertical(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    fn solid_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 0, 0, 255]),
        ))
    }

    #[test]
    fn test_rotate_by_angle() {
        let img = solid_image(2, 2);

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 90);
        assert_eq!(rotated.dimensions(), (2, 2));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 180);
        assert_eq!(rotated.dimensions(), (2, 2));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 270);
        assert_eq!(rotated.dimensions(), (2, 2));

        // Invalid angle returns the image unchanged
        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 45);
        assert_eq!(rotated.dimensions(), img.dimensions());
    }

    #[test]
    fn test_rotation_dimension_changes() {
        let img = solid_image(4, 2);
        assert_eq!(img.dimensions(), (4, 2));

        // 90 and 270 degree rotations swap dimensions
        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 90);
        assert_eq!(rotated.dimensions(), (2, 4));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 180);
        assert_eq!(rotated.dimensions(), (4, 2));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 270);
        assert_eq!(rotated.dimensions(), (2, 4));
    }

    #[test]
    fn test_flip_operations() {
        let img = solid_image(2, 3);

        let flipped = ImageOrientation::flip_horizontal(img.clone());
        assert_eq!(flipped.dimensions(), (2, 3));

        let flipped = ImageOrientation::flip_vertical(img.clone());
        assert_eq!(flipped.dimensions(), (2, 3));
    }

    #[test]
    fn test_apply_normal_orientation_is_identity() {
        let img = solid_image(100, 50);
        let oriented = ImageOrientation::apply(img.clone(), 1);
        assert_eq!(oriented.dimensions(), (100, 50));
    }

    #[test]
    fn test_apply_rotating_orientation_swaps_dimensions() {
        let img = solid_image(100, 50);

        // Orientation 6 (rotate 90 CW) swaps width and height
        let oriented = ImageOrientation::apply(img.clone(), 6);
        assert_eq!(oriented.dimensions(), (50, 100));

        // Orientation 8 (rotate 270 CW) does too
        let oriented = ImageOrientation::apply(img.clone(), 8);
        assert_eq!(oriented.dimensions(), (50, 100));

        // Orientation 3 (rotate 180) keeps them
        let oriented = ImageOrientation::apply(img, 3);
        assert_eq!(oriented.dimensions(), (100, 50));
    }

    #[test]
    fn test_apply_moves_pixels_correctly() {
        // 2x1 image: red on the left, green on the right
        let mut buf = RgbaImage::new(2, 1);
        buf.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        buf.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        let img = DynamicImage::ImageRgba8(buf);

        // Orientation 2 mirrors horizontally: green ends up on the left
        let mirrored = ImageOrientation::apply(img, 2);
        assert_eq!(mirrored.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(mirrored.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
    }
}
