//! Geometric augmentations and the random parameter sampler they share.
//!
//! Every batch helper preserves batch length and order. Random transforms take
//! the RNG explicitly so callers can seed them.

mod flip;
mod resize;
mod rotate;
mod sample;
mod zoom;

pub use flip::{flip_image, flip_images};
pub use resize::{resize_image, resize_images};
pub use rotate::{rotate_by, rotate_image, rotate_images, DEFAULT_ROTATION};
pub use sample::{sample_range, Jitter};
pub use zoom::{zoom_by, zoom_image, zoom_images, DEFAULT_ZOOM};
