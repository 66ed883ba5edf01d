//! Mirror flips.

use image::DynamicImage;

/// Mirror an image left-right when `horizontal`, top-bottom otherwise.
#[must_use]
pub fn flip_image(img: &DynamicImage, horizontal: bool) -> DynamicImage {
    if horizontal {
        img.fliph()
    } else {
        img.flipv()
    }
}

/// Apply [`flip_image`] to every image in a batch, preserving order.
#[must_use]
pub fn flip_images(images: &[DynamicImage], horizontal: bool) -> Vec<DynamicImage> {
    images.iter().map(|img| flip_image(img, horizontal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn corners() -> DynamicImage {
        // 2x2: red, green / blue, white
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_horizontal_flip() {
        let flipped = flip_image(&corners(), true);
        assert_eq!(
            flipped.as_bytes(),
            &[0, 255, 0, 255, 0, 0, 255, 255, 255, 0, 0, 255]
        );
    }

    #[test]
    fn test_vertical_flip() {
        let flipped = flip_image(&corners(), false);
        assert_eq!(
            flipped.as_bytes(),
            &[0, 0, 255, 255, 255, 255, 255, 0, 0, 0, 255, 0]
        );
    }

    #[test]
    fn test_flip_is_involution() {
        let img = corners();
        for horizontal in [true, false] {
            let twice = flip_image(&flip_image(&img, horizontal), horizontal);
            assert_eq!(twice.as_bytes(), img.as_bytes());
        }
    }

    #[test]
    fn test_batch_order() {
        let batch = vec![corners(), DynamicImage::new_luma8(3, 1)];
        let out = flip_images(&batch, true);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_bytes()[..3], [0, 255, 0]);
        assert!(matches!(out[1], DynamicImage::ImageLuma8(_)));
    }
}
