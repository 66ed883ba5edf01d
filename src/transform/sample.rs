//! Uniform sampling of augmentation parameters.

use rand::distr::Uniform;
use rand::Rng;

use crate::error::{Error, Result};

/// A parameter given either as a single magnitude or an explicit range.
///
/// How a [`Jitter::Scalar`] is widened into a range depends on the caller:
/// [`sample_range`] uses `[-x, x]`, the zoom transform uses `[x / 2, x]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jitter {
    Scalar(f32),
    Range(f32, f32),
}

impl From<f32> for Jitter {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<(f32, f32)> for Jitter {
    fn from((min, max): (f32, f32)) -> Self {
        Self::Range(min, max)
    }
}

impl From<[f32; 2]> for Jitter {
    fn from([min, max]: [f32; 2]) -> Self {
        Self::Range(min, max)
    }
}

/// Sample uniformly from `[min, max]` for a range, or `[-x, x]` for a scalar.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if a bound is not finite.
pub fn sample_range<R: Rng + ?Sized>(num: impl Into<Jitter>, rng: &mut R) -> Result<f32> {
    match num.into() {
        Jitter::Scalar(x) => uniform(-x, x, rng),
        Jitter::Range(min, max) => uniform(min, max, rng),
    }
}

/// Sample uniformly from the closed interval spanned by `a` and `b`.
///
/// The bounds may be given in either order.
pub(crate) fn uniform<R: Rng + ?Sized>(a: f32, b: f32, rng: &mut R) -> Result<f32> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let dist = Uniform::new_inclusive(low, high)
        .map_err(|err| Error::invalid("range", format!("[{a}, {b}]: {err}")))?;
    Ok(rng.sample(dist))
}
