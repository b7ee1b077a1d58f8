//! Image loading and saving as RGB tensors.

mod load;
mod save;

pub use load::load_image;
pub use save::save_image;

use ndarray::Array4;

/// Image tensor in NCHW format (batch, channels, height, width).
/// Values are normalized to the [0, 1] range.
pub type ImageTensor = Array4<f32>;
