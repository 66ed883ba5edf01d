//! Conversion between decoded images and `ndarray` arrays.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use ndarray::{Array3, Array4, ArrayD, ArrayView3, ArrayViewD, Axis, Ix3};

use crate::error::{Error, Result};

use super::{GRAY_CHANNELS, RGBA_CHANNELS, RGB_CHANNELS};

/// Stack a batch of same-shaped images into one `u8` array.
///
/// The default layout is `(N, H, W, C)`. With `channel_first` the channel axis
/// is moved directly after the batch axis, giving `(N, C, H, W)`.
///
/// # Errors
///
/// Returns [`Error::Shape`] if the batch is empty or the images do not share
/// the same height, width and channel count.
pub fn to_array(images: &[DynamicImage], channel_first: bool) -> Result<Array4<u8>> {
    let arrays = images
        .iter()
        .map(image_to_array)
        .collect::<Result<Vec<Array3<u8>>>>()?;

    let Some(first) = arrays.first() else {
        return Err(Error::shape("at least one image", "empty batch"));
    };

    if let Some(other) = arrays.iter().find(|a| a.shape() != first.shape()) {
        return Err(Error::shape(
            format!("{:?}", first.shape()),
            format!("{:?}", other.shape()),
        ));
    }

    let views: Vec<ArrayView3<'_, u8>> = arrays.iter().map(Array3::view).collect();
    let stacked = ndarray::stack(Axis(0), &views).map_err(|err| {
        Error::shape(format!("{:?}", first.shape()), err.to_string())
    })?;

    Ok(if channel_first {
        stacked.permuted_axes([0, 3, 1, 2]).as_standard_layout().into_owned()
    } else {
        stacked
    })
}

/// Convert an image to an `(H, W, C)` array.
///
/// Luma, RGB and RGBA images keep their channel count (1, 3 and 4); any other
/// color type is converted to RGB first.
///
/// # Errors
///
/// Returns [`Error::Shape`] if the pixel buffer does not match the image
/// dimensions.
pub fn image_to_array(img: &DynamicImage) -> Result<Array3<u8>> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let (channels, raw) = match img {
        DynamicImage::ImageLuma8(buf) => (GRAY_CHANNELS, buf.as_raw().clone()),
        DynamicImage::ImageRgb8(buf) => (RGB_CHANNELS, buf.as_raw().clone()),
        DynamicImage::ImageRgba8(buf) => (RGBA_CHANNELS, buf.as_raw().clone()),
        other => (RGB_CHANNELS, other.to_rgb8().into_raw()),
    };

    Array3::from_shape_vec((height, width, channels), raw).map_err(|err| {
        Error::shape(format!("({height}, {width}, {channels})"), err.to_string())
    })
}

/// Convert an `(H, W)` or `(H, W, C)` array back into an image.
///
/// `C` must be 1 (luma), 3 (RGB) or 4 (RGBA).
///
/// # Errors
///
/// Returns [`Error::Shape`] if the array has an unsupported shape.
#[allow(clippy::cast_possible_truncation)]
pub fn array_to_image(array: &ArrayViewD<'_, u8>) -> Result<DynamicImage> {
    let unsupported =
        || Error::shape("(H, W) or (H, W, C) with C in {1, 3, 4}", format!("{:?}", array.shape()));

    let hwc = match array.ndim() {
        2 => array.clone().insert_axis(Axis(2)),
        3 => array.clone(),
        _ => return Err(unsupported()),
    };
    let hwc = hwc.into_dimensionality::<Ix3>().map_err(|_| unsupported())?;

    let (height, width, channels) = hwc.dim();
    let raw: Vec<u8> = hwc.iter().copied().collect();
    let (width, height) = (width as u32, height as u32);

    let img = match channels {
        GRAY_CHANNELS => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        RGB_CHANNELS => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        RGBA_CHANNELS => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        _ => None,
    };

    img.ok_or_else(unsupported)
}

/// Owned-array convenience for [`array_to_image`].
///
/// # Errors
///
/// Returns [`Error::Shape`] if the array has an unsupported shape.
pub fn array_into_image(array: &ArrayD<u8>) -> Result<DynamicImage> {
    array_to_image(&array.view())
}
