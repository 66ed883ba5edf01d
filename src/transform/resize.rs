//! Letterboxed resizing.

use image::{imageops, imageops::FilterType, DynamicImage};

use crate::error::{Error, Result};

/// Fit an image into exactly `size = (width, height)` pixels.
///
/// The image is scaled down proportionally until it fits (it is never scaled
/// up) and then placed at offset `max((target - scaled) / 2, 0)` on a blank
/// canvas of the requested size. Uncovered pixels are zero-valued (black, or
/// transparent for images with alpha); treat that as best-effort letterboxing
/// rather than a guaranteed padding color.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if either target dimension is zero.
pub fn resize_image(img: &DynamicImage, size: (u32, u32)) -> Result<DynamicImage> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return Err(Error::invalid(
            "size",
            format!("dimensions must be positive (got {width}x{height})"),
        ));
    }

    let scaled = if img.width() > width || img.height() > height {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    let offset_x = width.saturating_sub(scaled.width()) / 2;
    let offset_y = height.saturating_sub(scaled.height()) / 2;

    let mut canvas = DynamicImage::new(width, height, img.color());
    imageops::replace(&mut canvas, &scaled, i64::from(offset_x), i64::from(offset_y));

    Ok(canvas)
}

/// Apply [`resize_image`] to every image in a batch, preserving order.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if either target dimension is zero.
pub fn resize_images(images: &[DynamicImage], size: (u32, u32)) -> Result<Vec<DynamicImage>> {
    images.iter().map(|img| resize_image(img, size)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn filled(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 0, 0])))
    }

    #[test]
    fn test_output_matches_target() {
        for (w, h) in [(100, 50), (50, 100), (10, 10), (300, 299), (1, 1)] {
            let out = resize_image(&filled(w, h), (64, 48)).unwrap();
            assert_eq!(out.dimensions(), (64, 48), "input {w}x{h}");
        }
    }

    #[test]
    fn test_downscale_is_centered() {
        // 200x100 fits into 100x100 as 100x50, centered vertically at y=25
        let out = resize_image(&filled(200, 100), (100, 100)).unwrap();
        assert_eq!(out.get_pixel(50, 10).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(50, 90).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_no_upscale() {
        // 4x2 into 10x10 stays 4x2 at offset (3, 4)
        let out = resize_image(&filled(4, 2), (10, 10)).unwrap();
        assert_eq!(out.get_pixel(3, 4).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(6, 5).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(2, 4).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(7, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_keeps_color_type() {
        let gray = DynamicImage::new_luma8(30, 20);
        let out = resize_image(&gray, (8, 8)).unwrap();
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_batch_preserves_order() {
        let batch = vec![filled(10, 10), filled(20, 5)];
        let out = resize_images(&batch, (6, 6)).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|img| img.dimensions() == (6, 6)));
    }

    #[test]
    fn test_zero_target() {
        assert!(matches!(
            resize_image(&filled(4, 4), (0, 4)),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
