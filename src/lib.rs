//! # `hlsconv`
//!
//! Differentiable RGB <-> HLS colorspace conversion for batched image tensors.
//!
//! Tensors are channel-first `(..., 3, H, W)` [`ndarray`] arrays. RGB values are
//! normalized to [0, 1]; HLS hue is in radians, lightness and saturation in
//! [0, 1]. Every branch of the conversion is an element-wise masked select,
//! so the same kernels run on `f32`, `f64` and [`autodiff::Dual`] elements.
//!
//! ## Example
//!
//! ```
//! use hlsconv::{hls_to_rgb, rgb_to_hls};
//! use ndarray::Array4;
//!
//! # fn main() -> hlsconv::Result<()> {
//! let rgb = Array4::<f32>::from_elem((2, 3, 4, 4), 0.25);
//! let hls = rgb_to_hls(&rgb)?;
//! let back = hls_to_rgb(&hls)?;
//!
//! assert_eq!(back.shape(), rgb.shape());
//! # Ok(())
//! # }
//! ```

pub mod autodiff;
pub mod color;
pub mod error;
pub mod image;
pub mod ops;
pub mod pipeline;
pub mod scalar;

pub use color::{hls_to_rgb, rgb_to_hls, ColorTransform, HlsToRgb, RgbToHls};
pub use error::{Error, Result};
pub use pipeline::{Config, Pipeline};
pub use scalar::Scalar;
