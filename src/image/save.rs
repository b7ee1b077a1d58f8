//! Image saving utilities.

use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::error::{Error, Result};
use crate::ops::CHANNELS;

use super::ImageTensor;

/// Save a tensor as an image file.
///
/// The first image of the batch is:
/// 1. Clamped to [0, 1] and scaled to [0, 255]
/// 2. Saved to the specified path (format inferred from extension)
///
/// # Arguments
///
/// * `tensor` - NCHW tensor with values in [0, 1]
/// * `path` - Output file path
/// * `quality` - JPEG quality (1-100), ignored for other formats
///
/// # Errors
///
/// Returns an error if the tensor is not `(N, 3, H, W)` with `N >= 1`, or if
/// the image cannot be saved.
pub fn save_image<P: AsRef<Path>>(tensor: &ImageTensor, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();

    let img = tensor_to_image(tensor)?;
    let img = image::DynamicImage::ImageRgb8(img);

    // Determine format and save
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => {
            let mut output = std::fs::File::create(path)?;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
            img.write_with_encoder(encoder)
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            img.save(path).map_err(|source| Error::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    tracing::debug!("Saved {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(())
}

/// Convert the first image of a normalized NCHW tensor to an RGB image.
#[allow(clippy::cast_possible_truncation)]
fn tensor_to_image(tensor: &ImageTensor) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let (batch, channels, height, width) = tensor.dim();
    if batch == 0 || channels != CHANNELS {
        return Err(Error::ShapeMismatch {
            expected: "(N >= 1, 3, H, W)".to_string(),
            actual: format!("{:?}", tensor.shape()),
        });
    }

    let width = u32::try_from(width).map_err(|_| Error::ShapeMismatch {
        expected: "width that fits in u32".to_string(),
        actual: width.to_string(),
    })?;
    let height = u32::try_from(height).map_err(|_| Error::ShapeMismatch {
        expected: "height that fits in u32".to_string(),
        actual: height.to_string(),
    })?;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([0, 1, 2].map(|c| denormalize(tensor[[0, c, y, x]])))
    }))
}

/// Denormalize a value from [0, 1] to [0, 255] with clamping.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn denormalize(value: f32) -> u8 {
    // Safe: clamped to [0, 255] range before casting
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
