//! Config-driven batch augmentation.

use image::DynamicImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::image::{array_into_image, image_to_array};
use crate::transform::{flip_images, resize_images, rotate_images, zoom_image, Jitter};

/// Configuration for the augmentation pipeline.
///
/// Steps run in field order: resize, rotate, horizontal flip, vertical flip,
/// zoom. Disabled steps are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentConfig {
    /// Letterbox every image to `(width, height)`.
    pub resize: Option<(u32, u32)>,

    /// Random rotation in degrees.
    pub rotate: Option<Jitter>,

    /// Mirror every image left-right.
    pub flip_horizontal: bool,

    /// Mirror every image top-bottom.
    pub flip_vertical: bool,

    /// Random perspective zoom inset in pixels.
    pub zoom: Option<Jitter>,

    /// Random seed for reproducibility. None for random.
    pub seed: Option<u64>,
}

impl AugmentConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if let Some((width, height)) = self.resize {
            if width == 0 || height == 0 {
                return Err(Error::invalid("resize", "dimensions must be positive"));
            }
        }

        if let Some(angle) = self.rotate {
            check_finite("rotate", angle)?;
        }

        if let Some(factor) = self.zoom {
            check_finite("zoom", factor)?;
            let negative = match factor {
                Jitter::Scalar(f) => f < 0.0,
                Jitter::Range(min, max) => min < 0.0 || max < 0.0,
            };
            if negative {
                return Err(Error::invalid("zoom", "inset must not be negative"));
            }
        }

        Ok(())
    }
}

fn check_finite(name: &str, jitter: Jitter) -> Result<()> {
    let finite = match jitter {
        Jitter::Scalar(x) => x.is_finite(),
        Jitter::Range(min, max) => min.is_finite() && max.is_finite(),
    };
    if finite {
        Ok(())
    } else {
        Err(Error::invalid(name, "bounds must be finite"))
    }
}

/// Applies an [`AugmentConfig`] to image batches with its own RNG.
pub struct Augmenter {
    config: AugmentConfig,
    rng: StdRng,
}

impl Augmenter {
    /// Create a new augmenter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: AugmentConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Initializing augmenter with config: {config:?}");

        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self { config, rng })
    }

    /// Get the configuration this augmenter was built with.
    #[must_use]
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Augment a batch, returning images in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if a transform fails, e.g. a zoom inset that lands on
    /// the exact middle of an image.
    pub fn apply(&mut self, images: &[DynamicImage]) -> Result<Vec<DynamicImage>> {
        tracing::info!("Augmenting batch of {} images", images.len());

        let mut batch = match self.config.resize {
            Some(size) => resize_images(images, size)?,
            None => images.to_vec(),
        };

        if let Some(angle) = self.config.rotate {
            batch = rotate_images(&batch, angle, &mut self.rng)?;
        }

        if self.config.flip_horizontal {
            batch = flip_images(&batch, true);
        }

        if self.config.flip_vertical {
            batch = flip_images(&batch, false);
        }

        if let Some(factor) = self.config.zoom {
            batch = batch
                .iter()
                .map(|img| {
                    let array = image_to_array(img)?.into_dyn();
                    let zoomed = zoom_image(&array.view(), factor, &mut self.rng)?;
                    array_into_image(&zoomed)
                })
                .collect::<Result<_>>()?;
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.put_pixel(x, y, Rgb([(x * 8) as u8, (y * 8) as u8, 64]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_default_is_identity() {
        let batch = vec![gradient(12, 8), gradient(5, 5)];
        let mut augmenter = Augmenter::new(AugmentConfig::default()).unwrap();
        let out = augmenter.apply(&batch).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_bytes(), batch[0].as_bytes());
        assert_eq!(out[1].as_bytes(), batch[1].as_bytes());
    }

    #[test]
    fn test_full_pipeline_shapes() {
        let config = AugmentConfig {
            resize: Some((24, 16)),
            rotate: Some(Jitter::Scalar(15.0)),
            flip_horizontal: true,
            zoom: Some(Jitter::Range(1.0, 3.0)),
            seed: Some(7),
            ..AugmentConfig::default()
        };
        let mut augmenter = Augmenter::new(config).unwrap();
        let out = augmenter.apply(&[gradient(30, 30), gradient(10, 40)]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|img| img.dimensions() == (24, 16)));
        assert!(out.iter().all(|img| matches!(img, DynamicImage::ImageRgb8(_))));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = AugmentConfig {
            rotate: Some(Jitter::Range(-30.0, 30.0)),
            zoom: Some(Jitter::Scalar(4.0)),
            seed: Some(1234),
            ..AugmentConfig::default()
        };
        let batch = vec![gradient(20, 20)];

        let a = Augmenter::new(config.clone()).unwrap().apply(&batch).unwrap();
        let b = Augmenter::new(config).unwrap().apply(&batch).unwrap();
        assert_eq!(a[0].as_bytes(), b[0].as_bytes());
    }

    #[test]
    fn test_validate() {
        let bad_resize = AugmentConfig {
            resize: Some((0, 10)),
            ..AugmentConfig::default()
        };
        assert!(bad_resize.validate().is_err());

        let bad_rotate = AugmentConfig {
            rotate: Some(Jitter::Scalar(f32::NAN)),
            ..AugmentConfig::default()
        };
        assert!(Augmenter::new(bad_rotate).is_err());

        let bad_zoom = AugmentConfig {
            zoom: Some(Jitter::Range(-2.0, 4.0)),
            ..AugmentConfig::default()
        };
        assert!(bad_zoom.validate().is_err());
    }
}
