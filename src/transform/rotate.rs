//! Random rotation about the image center.

use image::{DynamicImage, Luma, LumaA, Rgb, Rgba};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::Rng;

use crate::error::Result;

use super::sample::{sample_range, Jitter};

/// Default maximum rotation in degrees.
pub const DEFAULT_ROTATION: f32 = 20.0;

/// Rotate an image by a random angle.
///
/// A [`Jitter::Scalar`] `a` samples the angle uniformly from `[-a, a]`
/// degrees, a [`Jitter::Range`] from `[min, max]`. Positive angles rotate
/// counter-clockwise. The canvas keeps the input size, so corners are cropped,
/// and the exposed background is zero-valued; no particular fill color is
/// guaranteed.
///
/// # Errors
///
/// Returns an error if the angle range has non-finite bounds.
pub fn rotate_image<R: Rng + ?Sized>(
    img: &DynamicImage,
    angle: impl Into<Jitter>,
    rng: &mut R,
) -> Result<DynamicImage> {
    let degrees = sample_range(angle, rng)?;
    tracing::debug!("Rotating {}x{} image by {degrees:.2} degrees", img.width(), img.height());
    Ok(rotate_by(img, degrees))
}

/// Apply [`rotate_image`] to every image in a batch, sampling each angle
/// independently.
///
/// # Errors
///
/// Returns an error if the angle range has non-finite bounds.
pub fn rotate_images<R: Rng + ?Sized>(
    images: &[DynamicImage],
    angle: impl Into<Jitter>,
    rng: &mut R,
) -> Result<Vec<DynamicImage>> {
    let angle = angle.into();
    images
        .iter()
        .map(|img| rotate_image(img, angle, rng))
        .collect()
}

/// Rotate counter-clockwise by `degrees`, keeping the canvas size.
#[must_use]
pub fn rotate_by(img: &DynamicImage, degrees: f32) -> DynamicImage {
    if degrees.abs() < f32::EPSILON {
        return img.clone();
    }

    // imageproc rotates clockwise for positive theta
    let theta = -degrees.to_radians();
    let interp = Interpolation::Bilinear;

    match img {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(rotate_about_center(buf, theta, interp, Luma([0])))
        }
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(rotate_about_center(buf, theta, interp, LumaA([0, 0])))
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(rotate_about_center(buf, theta, interp, Rgb([0, 0, 0])))
        }
        DynamicImage::ImageRgba8(buf) => {
            DynamicImage::ImageRgba8(rotate_about_center(buf, theta, interp, Rgba([0, 0, 0, 0])))
        }
        other => {
            let rgba = other.to_rgba8();
            DynamicImage::ImageRgba8(rotate_about_center(&rgba, theta, interp, Rgba([0, 0, 0, 0])))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_keeps_size_and_type() {
        let mut rng = StdRng::seed_from_u64(1);
        let img = DynamicImage::ImageRgb8(RgbImage::new(31, 17));
        let out = rotate_image(&img, DEFAULT_ROTATION, &mut rng).unwrap();
        assert_eq!(out.dimensions(), (31, 17));
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut buf = GrayImage::new(9, 9);
        buf.put_pixel(2, 6, Luma([200]));
        let img = DynamicImage::ImageLuma8(buf);
        let out = rotate_image(&img, (0.0_f32, 0.0), &mut rng).unwrap();
        assert_eq!(out.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        // A bright pixel right of center moves above center
        let mut buf = GrayImage::new(11, 11);
        buf.put_pixel(8, 5, Luma([255]));
        let out = rotate_by(&DynamicImage::ImageLuma8(buf), 90.0).to_luma8();
        let (x, y, peak) = out
            .enumerate_pixels()
            .max_by_key(|(_, _, p)| p[0])
            .map(|(x, y, p)| (x, y, p[0]))
            .unwrap();
        assert!(peak > 100);
        assert!(y < 5, "peak moved to ({x}, {y})");
        assert!((4..=6).contains(&x), "peak moved to ({x}, {y})");
        assert_eq!(out.get_pixel(8, 5)[0], 0);
    }

    #[test]
    fn test_batch_preserves_length() {
        let mut rng = StdRng::seed_from_u64(9);
        let batch = vec![DynamicImage::new_rgb8(8, 8), DynamicImage::new_luma8(4, 6)];
        let out = rotate_images(&batch, (-10.0_f32, 10.0), &mut rng).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].dimensions(), (4, 6));
    }
}
