//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use ndarray::Array4;

use crate::error::{Error, Result};
use crate::ops::CHANNELS;

use super::ImageTensor;

/// Load an image from disk and convert to a normalized tensor.
///
/// The image is:
/// 1. Loaded from the specified path
/// 2. Converted to RGB if necessary
/// 3. Normalized to [0, 1] range
/// 4. Returned as NCHW tensor (1, 3, height, width)
///
/// The original `(width, height)` is returned alongside.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(ImageTensor, (u32, u32))> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let dims = img.dimensions();
    tracing::debug!("Loaded {}x{} image from {}", dims.0, dims.1, path.display());

    Ok((image_to_tensor(&img), dims))
}

/// Convert a `DynamicImage` to a normalized NCHW tensor.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn image_to_tensor(img: &DynamicImage) -> ImageTensor {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let mut tensor = Array4::<f32>::zeros((1, CHANNELS, height, width));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..CHANNELS {
            tensor[[0, c, y, x]] = f32::from(pixel[c]) / 255.0;
        }
    }

    tensor
}
