//! # `imgbatch`
//!
//! Image loading, batching, geometric augmentation, and training-curve plotting
//! helpers for machine-learning image pipelines.
//!
//! Images are `DynamicImage` values, batches are slices of them, and
//! pixel arrays are `ndarray` arrays of `u8`. Random transforms take the RNG
//! explicitly; [`Augmenter`] bundles them behind a seeded configuration.
//!
//! ## Example
//!
//! ```no_run
//! use imgbatch::{image, transform, AugmentConfig, Augmenter, Jitter};
//!
//! # fn main() -> imgbatch::Result<()> {
//! let images = image::load_images::<_, &str>("data/train", None, false)?;
//! let images = transform::resize_images(&images, (128, 128))?;
//!
//! let mut augmenter = Augmenter::new(AugmentConfig {
//!     rotate: Some(Jitter::Scalar(20.0)),
//!     flip_horizontal: true,
//!     seed: Some(42),
//!     ..AugmentConfig::default()
//! })?;
//! let augmented = augmenter.apply(&images)?;
//!
//! let batch = image::to_array(&augmented, true)?;
//! assert_eq!(batch.shape()[1], 3);
//! # Ok(())
//! # }
//! ```

pub mod augment;
pub mod error;
pub mod image;
pub mod plot;
pub mod transform;

pub use augment::{AugmentConfig, Augmenter};
pub use error::{Error, Result};
pub use plot::{save_history_loss, save_loss_plot, LossHistory};
pub use transform::Jitter;
