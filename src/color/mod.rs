//! RGB <-> HLS conversion over channel-first tensors.
//!
//! Both directions accept any `(..., 3, H, W)` array whose elements implement
//! [`Scalar`]: leading axes are batch dimensions, the third-from-last axis
//! holds the three channels. Hue is expressed in radians.

mod to_hls;
mod to_rgb;

pub use to_hls::rgb_to_hls;
pub use to_rgb::hls_to_rgb;

use ndarray::{Array, ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension};

use crate::error::Result;
use crate::ops::channel_axis;
use crate::scalar::Scalar;

/// A stateless, invertible color transform.
pub trait ColorTransform {
    /// The transform mapping outputs of `Self` back to its inputs.
    type Inverse: ColorTransform;

    /// Convert a `(..., 3, H, W)` tensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if the
    /// tensor has no 3-long channel axis.
    fn apply<A, S, D>(&self, image: &ArrayBase<S, D>) -> Result<Array<A, D>>
    where
        A: Scalar,
        S: Data<Elem = A>,
        D: Dimension;

    /// The inverse transform.
    fn inverse(&self) -> Self::Inverse;
}

/// Callable form of [`rgb_to_hls`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RgbToHls;

/// Callable form of [`hls_to_rgb`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HlsToRgb;

impl ColorTransform for RgbToHls {
    type Inverse = HlsToRgb;

    fn apply<A, S, D>(&self, image: &ArrayBase<S, D>) -> Result<Array<A, D>>
    where
        A: Scalar,
        S: Data<Elem = A>,
        D: Dimension,
    {
        rgb_to_hls(image)
    }

    fn inverse(&self) -> HlsToRgb {
        HlsToRgb
    }
}

impl ColorTransform for HlsToRgb {
    type Inverse = RgbToHls;

    fn apply<A, S, D>(&self, image: &ArrayBase<S, D>) -> Result<Array<A, D>>
    where
        A: Scalar,
        S: Data<Elem = A>,
        D: Dimension,
    {
        hls_to_rgb(image)
    }

    fn inverse(&self) -> RgbToHls {
        RgbToHls
    }
}

/// Split a tensor into its three channel planes.
fn split_planes<A, S, D>(image: &ArrayBase<S, D>) -> Result<(Axis, [ArrayViewD<'_, A>; 3])>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = channel_axis(image.shape())?;
    let view = image.view().into_dyn();
    let planes = [0, 1, 2].map(|channel| view.clone().index_axis_move(axis, channel));
    Ok((axis, planes))
}

/// Reassemble three channel planes into a tensor of the caller's dimensionality.
fn stack_planes<A, D>(axis: Axis, planes: &[ArrayD<A>; 3]) -> Result<Array<A, D>>
where
    A: Scalar,
    D: Dimension,
{
    let views = [planes[0].view(), planes[1].view(), planes[2].view()];
    let stacked = ndarray::stack(axis, &views)?;
    Ok(stacked.into_dimensionality::<D>()?)
}
