//! Perspective zoom on pixel arrays.

use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{warp, Interpolation, Projection};
use ndarray::{Array2, Array3, ArrayD, ArrayViewD, Axis, IxDyn};
use rand::Rng;

use crate::error::{Error, Result};

use super::sample::{uniform, Jitter};

/// Default zoom inset in pixels.
pub const DEFAULT_ZOOM: f32 = 10.0;

/// Zoom into a pixel array by a random inset.
///
/// A [`Jitter::Scalar`] `f` samples the inset uniformly from `[f / 2, f]`, a
/// [`Jitter::Range`] from `[min, max]`. The quadrilateral inset by that many
/// pixels from every edge is warped onto the full canvas, so the output keeps
/// the input shape.
///
/// The array is `(H, W)` or `(H, W, ...)`; trailing axes are treated as
/// channels and warped independently. An inset past the middle of the image
/// flips the quadrilateral and gives a mirrored zoom.
///
/// # Errors
///
/// Returns [`Error::Shape`] if the array has fewer than two dimensions or an
/// empty spatial axis, and [`Error::InvalidParameter`] if the sampled inset
/// lands exactly on the middle and leaves no projection.
pub fn zoom_image<R: Rng + ?Sized>(
    array: &ArrayViewD<'_, u8>,
    factor: impl Into<Jitter>,
    rng: &mut R,
) -> Result<ArrayD<u8>> {
    if array.ndim() < 2 {
        return Err(Error::shape(
            "at least 2 dimensions (H, W)",
            format!("{:?}", array.shape()),
        ));
    }

    let inset = match factor.into() {
        Jitter::Scalar(f) => uniform(f / 2.0, f, rng)?,
        Jitter::Range(min, max) => uniform(min, max, rng)?,
    };

    zoom_by(array, inset)
}

/// Apply [`zoom_image`] to every array in a batch and stack the results along
/// a new leading axis.
///
/// # Errors
///
/// Returns [`Error::Shape`] if the batch is empty, an array has fewer than two
/// dimensions, or the arrays differ in shape.
pub fn zoom_images<R: Rng + ?Sized>(
    arrays: &[ArrayD<u8>],
    factor: impl Into<Jitter>,
    rng: &mut R,
) -> Result<ArrayD<u8>> {
    let factor = factor.into();
    let zoomed = arrays
        .iter()
        .map(|array| zoom_image(&array.view(), factor, rng))
        .collect::<Result<Vec<_>>>()?;

    let views: Vec<ArrayViewD<'_, u8>> = zoomed.iter().map(ArrayD::view).collect();
    ndarray::stack(Axis(0), &views).map_err(|err| {
        let shapes: Vec<&[usize]> = zoomed.iter().map(ArrayD::shape).collect();
        Error::shape("a non-empty batch of equal shapes", format!("{shapes:?} ({err})"))
    })
}

/// Warp the region inset by `inset` pixels onto the full canvas.
///
/// # Errors
///
/// Returns [`Error::Shape`] for arrays without two non-empty spatial axes and
/// [`Error::InvalidParameter`] if the inset corners admit no projection.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn zoom_by(array: &ArrayViewD<'_, u8>, inset: f32) -> Result<ArrayD<u8>> {
    let shape = array.shape().to_vec();
    let &[rows, cols, ..] = shape.as_slice() else {
        return Err(Error::shape("at least 2 dimensions (H, W)", format!("{shape:?}")));
    };
    if rows == 0 || cols == 0 {
        return Err(Error::shape("non-empty spatial axes", format!("{shape:?}")));
    }

    let (w, h) = (cols as f32, rows as f32);

    let from = [
        (inset, inset),
        (w - inset, inset),
        (inset, h - inset),
        (w - inset, h - inset),
    ];
    let to = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let projection = Projection::from_control_points(from, to).ok_or_else(|| {
        Error::invalid("factor", format!("inset {inset:.2} gives a degenerate projection"))
    })?;

    let channels: usize = shape[2..].iter().product();
    let standard = array.as_standard_layout();
    let hwc = standard
        .view()
        .into_shape_with_order((rows, cols, channels))
        .map_err(|err| Error::shape(format!("{shape:?}"), err.to_string()))?;

    let mut out = Array3::<u8>::zeros((rows, cols, channels));
    for c in 0..channels {
        let plane: Vec<u8> = hwc.index_axis(Axis(2), c).iter().copied().collect();
        let gray = GrayImage::from_raw(cols as u32, rows as u32, plane)
            .ok_or_else(|| Error::shape(format!("{shape:?}"), "plane size mismatch"))?;

        let warped = warp(&gray, &projection, Interpolation::Bilinear, Luma([0]));
        let warped = Array2::from_shape_vec((rows, cols), warped.into_raw())
            .map_err(|err| Error::shape(format!("{shape:?}"), err.to_string()))?;
        out.index_axis_mut(Axis(2), c).assign(&warped);
    }

    out.into_shape_with_order(IxDyn(&shape))
        .map_err(|err| Error::shape(format!("{shape:?}"), err.to_string()))
}
