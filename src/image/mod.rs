//! Image loading, array conversion, and saving utilities.

mod array;
mod load;
mod save;

pub use array::{array_into_image, array_to_image, image_to_array, to_array};
pub use load::{list_images, load_image, load_images};
pub use save::{grid_layout, save_image, save_image_grid, with_default_extension, GridLayout};

use image::DynamicImage;
use ndarray::ArrayD;

/// File extensions picked up when scanning a directory (case-sensitive).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "gif", "png", "bmp"];

/// Extension appended to output paths that have none.
pub const DEFAULT_EXTENSION: &str = "png";

/// Default side length of a contact-sheet canvas.
pub const DEFAULT_GRID_SIZE: u32 = 800;

/// Number of channels in grayscale images.
pub const GRAY_CHANNELS: usize = 1;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

/// Number of channels in RGBA images.
pub const RGBA_CHANNELS: usize = 4;

/// Either a decoded image or a raw `(H, W[, C])` pixel array.
#[derive(Debug, Clone)]
pub enum ImageData {
    Image(DynamicImage),
    Array(ArrayD<u8>),
}

impl From<DynamicImage> for ImageData {
    fn from(img: DynamicImage) -> Self {
        Self::Image(img)
    }
}

impl From<ArrayD<u8>> for ImageData {
    fn from(array: ArrayD<u8>) -> Self {
        Self::Array(array)
    }
}
