//! Image normalization for model input.
//!
//! This module converts arbitrary uploaded image bytes into the fixed-shape
//! tensor the classification model expects: decode, convert to RGB, resize
//! to the target resolution, scale intensities into `[0.0, 1.0]`, and add a
//! leading batch dimension.

use crate::core::config::ClassifierConfig;
use crate::core::errors::ClassifyError;
use crate::core::tensor::Tensor4D;
use image::DynamicImage;
use image::imageops::FilterType;

/// Normalizes images into model-ready tensors.
///
/// This is a pure function of the input bytes: no filesystem access, no
/// state carried between calls. Aspect-ratio distortion from the fixed
/// target resolution is an accepted tradeoff for a uniform input shape.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    /// Target resolution as (height, width).
    target_shape: (u32, u32),
    /// Interpolation filter used when resizing.
    filter: FilterType,
    /// Scaling factor applied to integer pixel intensities.
    scale: f32,
}

impl ImageNormalizer {
    /// Creates a normalizer for the given target shape and resize filter.
    pub fn new(target_shape: (u32, u32), filter: FilterType) -> Self {
        Self {
            target_shape,
            filter,
            scale: 1.0 / 255.0,
        }
    }

    /// Creates a normalizer from a classifier configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.input_shape, config.resize_filter)
    }

    /// Returns the target resolution as (height, width).
    pub fn target_shape(&self) -> (u32, u32) {
        self.target_shape
    }

    /// Normalizes raw image bytes into a batched tensor.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidImage`] if the bytes are not a
    /// decodable image (corrupt data or an unrecognized format). Never
    /// returns a partial tensor.
    pub fn normalize(&self, bytes: &[u8]) -> Result<Tensor4D, ClassifyError> {
        let image = image::load_from_memory(bytes).map_err(ClassifyError::InvalidImage)?;
        Ok(self.normalize_image(&image))
    }

    /// Normalizes an already-decoded image into a batched tensor.
    ///
    /// The output has shape `(1, height, width, 3)` with every value in
    /// `[0.0, 1.0]`, regardless of the source resolution, aspect ratio, or
    /// channel count. Alpha and palette information is discarded by the RGB
    /// conversion.
    pub fn normalize_image(&self, image: &DynamicImage) -> Tensor4D {
        let (height, width) = self.target_shape;
        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(&rgb, width, height, self.filter);

        let mut tensor = Tensor4D::zeros((1, height as usize, width as usize, 3));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, y as usize, x as usize, channel]] = pixel[channel] as f32 * self.scale;
            }
        }
        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_normalize_produces_target_shape() {
        let normalizer = ImageNormalizer::new((160, 160), FilterType::CatmullRom);
        let bytes = encode_png(gradient_rgb(320, 240));

        let tensor = normalizer.normalize(&bytes).unwrap();
        assert_eq!(tensor.shape(), &[1, 160, 160, 3]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_normalize_non_square_target() {
        let normalizer = ImageNormalizer::new((120, 200), FilterType::Triangle);
        let bytes = encode_png(gradient_rgb(17, 643));

        let tensor = normalizer.normalize(&bytes).unwrap();
        assert_eq!(tensor.shape(), &[1, 120, 200, 3]);
    }

    #[test]
    fn test_normalize_discards_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            50,
            50,
            Rgba([200, 100, 50, 10]),
        ));
        let normalizer = ImageNormalizer::new((32, 32), FilterType::CatmullRom);

        let tensor = normalizer.normalize(&encode_png(rgba)).unwrap();
        assert_eq!(tensor.shape(), &[1, 32, 32, 3]);
        // A constant-color image survives resizing untouched.
        assert!((tensor[[0, 0, 0, 0]] - 200.0 / 255.0).abs() < 1e-6);
        assert!((tensor[[0, 0, 0, 1]] - 100.0 / 255.0).abs() < 1e-6);
        assert!((tensor[[0, 0, 0, 2]] - 50.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_expands_grayscale() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(40, 20, image::Luma([77])));
        let normalizer = ImageNormalizer::new((16, 16), FilterType::CatmullRom);

        let tensor = normalizer.normalize(&encode_png(gray)).unwrap();
        assert_eq!(tensor.shape(), &[1, 16, 16, 3]);
        // All three channels carry the replicated gray value.
        for channel in 0..3 {
            assert!((tensor[[0, 5, 5, channel]] - 77.0 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_normalize_scales_extremes() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
        let normalizer = ImageNormalizer::new((8, 8), FilterType::Nearest);

        let tensor = normalizer.normalize(&encode_png(white)).unwrap();
        assert!(tensor.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_normalize_rejects_garbage_bytes() {
        let normalizer = ImageNormalizer::new((160, 160), FilterType::CatmullRom);
        let result = normalizer.normalize(b"definitely not an image");
        assert!(matches!(result, Err(ClassifyError::InvalidImage(_))));
    }

    #[test]
    fn test_normalize_rejects_truncated_png() {
        let normalizer = ImageNormalizer::new((160, 160), FilterType::CatmullRom);
        let mut bytes = encode_png(gradient_rgb(64, 64));
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(
            normalizer.normalize(&bytes),
            Err(ClassifyError::InvalidImage(_))
        ));
    }
}
