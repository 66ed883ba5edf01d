//! Image saving utilities.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::{imageops, imageops::FilterType, DynamicImage, Rgb, RgbImage};
use ndarray::ArrayD;

use crate::error::{Error, Result};

use super::{array_to_image, ImageData, DEFAULT_EXTENSION};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Save a single image or pixel array.
///
/// A `.png` extension is appended when `path` has none; otherwise the format
/// is inferred from the extension. Arrays are converted with
/// [`array_to_image`](super::array_to_image) first.
///
/// Returns the path that was actually written.
///
/// # Errors
///
/// Returns [`Error::Shape`] if an array cannot be viewed as an image and
/// [`Error::ImageSave`] if encoding or writing fails.
pub fn save_image<P: AsRef<Path>>(path: P, img: &ImageData) -> Result<PathBuf> {
    let path = with_default_extension(path.as_ref());

    let img = match img {
        ImageData::Image(img) => Cow::Borrowed(img),
        ImageData::Array(array) => Cow::Owned(array_to_image(&array.view())?),
    };

    write_image(&path, &img)?;
    Ok(path)
}

/// Cell arrangement of a contact sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of rows that hold at least one image.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
    /// Side length of each square cell in pixels.
    pub cell: u32,
}

/// Compute the near-square grid used by [`save_image_grid`].
///
/// `cols = ceil(sqrt(n))`; rows start equal to `cols` and drop by one when
/// the last row would otherwise be empty. Cells are `ceil(size / cols)` wide.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `count` is zero or the cells would
/// be too small to hold a 1-pixel border around at least one pixel.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn grid_layout(count: usize, size: u32) -> Result<GridLayout> {
    if count == 0 {
        return Err(Error::invalid("images", "at least one image is required"));
    }

    let cols = (count as f64).sqrt().ceil() as u32;
    let mut rows = cols;
    if ((rows - 1) * cols) as usize >= count {
        rows -= 1;
    }
    let cell = size.div_ceil(cols);

    if cell < 3 {
        return Err(Error::invalid(
            "size",
            format!("{size}px canvas is too small for {count} images"),
        ));
    }

    Ok(GridLayout { rows, cols, cell })
}

/// Save a batch of pixel arrays as a `size x size` contact sheet.
///
/// Each image is stretched to `cell - 2` pixels square and framed by a
/// 1-pixel white border; cells are filled row-major on a white canvas.
/// Cells in the last row past the final image stay blank.
///
/// Cells are laid out by stepping the canvas in `cell`-pixel strides, so a
/// canvas too small to fit `cols` cells per row holds fewer cells than
/// images; the images that do not fit are left out with a warning.
///
/// Returns the path that was actually written (`.png` appended when the path
/// has no extension).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an empty batch or a canvas too small
/// for the grid, [`Error::Shape`] if an array cannot be viewed as an image, and
/// [`Error::ImageSave`] if writing fails.
pub fn save_image_grid<P: AsRef<Path>>(
    path: P,
    images: &[ArrayD<u8>],
    size: u32,
) -> Result<PathBuf> {
    let path = with_default_extension(path.as_ref());
    let layout = grid_layout(images.len(), size)?;

    tracing::info!(
        "Composing {} images into a {}x{} grid ({}px cells)",
        images.len(),
        layout.rows,
        layout.cols,
        layout.cell
    );

    let sheet = compose_grid(images, size, layout)?;

    write_image(&path, &DynamicImage::ImageRgb8(sheet))?;
    Ok(path)
}

fn compose_grid(images: &[ArrayD<u8>], size: u32, layout: GridLayout) -> Result<RgbImage> {
    let mut canvas = RgbImage::from_pixel(size, size, WHITE);
    let inner = layout.cell - 2;

    let origins: Vec<(u32, u32)> = (0..size)
        .step_by(layout.cell as usize)
        .flat_map(|y| (0..size).step_by(layout.cell as usize).map(move |x| (x, y)))
        .collect();

    if origins.len() < images.len() {
        tracing::warn!(
            "Grid of {size}px only fits {} of {} images",
            origins.len(),
            images.len()
        );
    }

    for (array, (x, y)) in images.iter().zip(origins) {
        let img = array_to_image(&array.view())?;
        let thumb = img.resize_exact(inner, inner, FilterType::Triangle).to_rgb8();

        let mut framed = RgbImage::from_pixel(layout.cell, layout.cell, WHITE);
        imageops::replace(&mut framed, &thumb, 1, 1);
        imageops::replace(&mut canvas, &framed, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}

/// Append the default `png` extension to a path that has none.
#[must_use]
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

fn write_image(path: &Path, img: &DynamicImage) -> Result<()> {
    img.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Saved {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(())
}
