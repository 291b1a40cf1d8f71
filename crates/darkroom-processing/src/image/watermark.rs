use crate::error::ProcessError;
use ab_glyph::{FontVec, PxScale};
use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::PathBuf;

/// Watermark configuration
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    pub text: String,
    pub opacity: f32,
    pub size_divisor: u32,
    pub font_path: Option<PathBuf>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: "© Darkroom Studio".to_string(),
            opacity: 0.6,
            size_divisor: 16,
            font_path: None,
        }
    }
}

/// Renders a semi-transparent text watermark into the bottom-right corner.
///
/// The renderer is disabled when no font is configured or the font file
/// cannot be loaded; callers check `is_enabled` and skip the overlay.
pub struct WatermarkRenderer {
    font: Option<FontVec>,
    text: String,
    opacity: f32,
    size_divisor: u32,
}

impl WatermarkRenderer {
    pub fn from_config(config: WatermarkConfig) -> Self {
        let font = match &config.font_path {
            Some(path) => match std::fs::read(path) {
                Ok(bytes) => match FontVec::try_from_vec(bytes) {
                    Ok(font) => Some(font),
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %err,
                            "Invalid watermark font; watermarking disabled"
                        );
                        None
                    }
                },
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Cannot read watermark font; watermarking disabled"
                    );
                    None
                }
            },
            None => {
                tracing::debug!("No watermark font configured; watermarking disabled");
                None
            }
        };

        Self {
            font,
            text: config.text,
            opacity: config.opacity,
            size_divisor: config.size_divisor,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.font.is_some()
    }

    /// Draw the watermark text onto a copy of the image.
    ///
    /// Text height scales with image width so the mark stays proportional
    /// across photo sizes. White glyphs are drawn over a dark drop shadow
    /// to keep the text legible on bright and dark backgrounds alike.
    pub fn apply(&self, img: &DynamicImage) -> Result<DynamicImage, ProcessError> {
        let font = self
            .font
            .as_ref()
            .ok_or_else(|| ProcessError::Watermark("no watermark font loaded".to_string()))?;

        let (img_width, img_height) = img.dimensions();
        let px_height = (img_width / self.size_divisor).max(12);
        let scale = PxScale::from(px_height as f32);

        let (text_width, text_height) = text_size(scale, font, &self.text);
        if text_width == 0 || text_height == 0 {
            return Err(ProcessError::Watermark(
                "text layout produced no glyphs".to_string(),
            ));
        }

        // Render onto a transparent canvas first so opacity applies to the
        // whole mark, shadow included.
        let shadow_offset = (px_height / 24).max(1);
        let mut overlay = RgbaImage::new(text_width + shadow_offset, text_height + shadow_offset);
        draw_text_mut(
            &mut overlay,
            Rgba([0, 0, 0, 200]),
            shadow_offset as i32,
            shadow_offset as i32,
            scale,
            font,
            &self.text,
        );
        draw_text_mut(
            &mut overlay,
            Rgba([255, 255, 255, 255]),
            0,
            0,
            scale,
            font,
            &self.text,
        );

        if self.opacity < 1.0 {
            for pixel in overlay.pixels_mut() {
                pixel[3] = (pixel[3] as f32 * self.opacity) as u8;
            }
        }

        let margin = (img_width / 64).max(16) as i64;
        let x = (img_width as i64 - overlay.width() as i64 - margin).max(0);
        let y = (img_height as i64 - overlay.height() as i64 - margin).max(0);

        let mut base = img.to_rgba8();
        imageops::overlay(&mut base, &overlay, x, y);

        Ok(DynamicImage::ImageRgba8(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatermarkConfig::default();
        assert_eq!(config.text, "© Darkroom Studio");
        assert_eq!(config.opacity, 0.6);
        assert_eq!(config.size_divisor, 16);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_renderer_disabled_without_font() {
        let renderer = WatermarkRenderer::from_config(WatermarkConfig::default());
        assert!(!renderer.is_enabled());
    }

    #[test]
    fn test_renderer_disabled_for_missing_font_file() {
        let config = WatermarkConfig {
            font_path: Some(PathBuf::from("/nonexistent/watermark.ttf")),
            ..WatermarkConfig::default()
        };
        let renderer = WatermarkRenderer::from_config(config);
        assert!(!renderer.is_enabled());
    }

    #[test]
    fn test_apply_without_font_is_an_error() {
        let renderer = WatermarkRenderer::from_config(WatermarkConfig::default());
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            100,
            100,
            Rgba([128, 128, 128, 255]),
        ));
        let result = renderer.apply(&img);
        assert!(matches!(result, Err(ProcessError::Watermark(_))));
    }
}
