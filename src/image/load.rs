//! Image loading utilities.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError};

use crate::error::{Error, Result};

use super::IMAGE_EXTENSIONS;

/// Load a batch of images from a directory.
///
/// When `files` is `None` the directory is scanned (non-recursively) and every
/// regular file whose extension is in [`IMAGE_EXTENSIONS`] is loaded, in
/// directory-listing order. When `files` is given the scan is skipped and each
/// name is joined onto `dir` as-is.
///
/// Images are converted to single-channel luma if `grayscale` is set and to
/// three-channel RGB otherwise.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the directory or a listed file does not
/// exist, and [`Error::Decode`] if any file cannot be decoded.
pub fn load_images<P, S>(dir: P, files: Option<&[S]>, grayscale: bool) -> Result<Vec<DynamicImage>>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let dir = dir.as_ref();

    let paths: Vec<PathBuf> = match files {
        Some(names) => names.iter().map(|name| dir.join(name)).collect(),
        None => list_images(dir)?,
    };

    tracing::info!("Loading {} images from {}", paths.len(), dir.display());

    paths
        .iter()
        .map(|path| load_image(path, grayscale))
        .collect()
}

/// Load a single image, converting it to luma or RGB.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist and
/// [`Error::Decode`] if it cannot be decoded.
pub fn load_image<P: AsRef<Path>>(path: P, grayscale: bool) -> Result<DynamicImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| match source {
        ImageError::IoError(ref err) if err.kind() == ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        source => Error::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(if grayscale {
        DynamicImage::ImageLuma8(img.to_luma8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    })
}

/// List the image files of a directory in directory-listing order.
///
/// Only files whose extension matches [`IMAGE_EXTENSIONS`] exactly
/// (case-sensitive) are returned. Symlinks are followed, so a link to an
/// image counts as an image.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the directory does not exist.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    let entries = fs::read_dir(dir).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::NotFound {
            path: dir.to_path_buf(),
        },
        _ => Error::Io(err),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }

    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}
