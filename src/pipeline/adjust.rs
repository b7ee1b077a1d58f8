//! Hue, lightness and saturation adjustments on HLS tensors.

use ndarray::{Array, ArrayBase, ArrayViewMutD, Axis, Data, Dimension};

use crate::error::{Error, Result};
use crate::ops::channel_axis;
use crate::scalar::Scalar;

/// Largest accepted lightness or saturation scale.
const MAX_SCALE: f32 = 10.0;

/// Configuration for the HLS adjustment pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Hue rotation in degrees. Any finite value; wraps around the circle.
    pub hue_shift_degrees: f32,

    /// Lightness multiplier (0.0-10.0). Result is clamped to [0, 1].
    pub lightness_scale: f32,

    /// Saturation multiplier (0.0-10.0). Result is clamped to [0, 1].
    pub saturation_scale: f32,

    /// Output JPEG quality (1-100).
    pub output_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hue_shift_degrees: 0.0,
            lightness_scale: 1.0,
            saturation_scale: 1.0,
            output_quality: 95,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.hue_shift_degrees.is_finite() {
            return Err(Error::InvalidParameter {
                name: "hue_shift_degrees".to_string(),
                reason: "must be finite".to_string(),
            });
        }

        for (name, scale) in [
            ("lightness_scale", self.lightness_scale),
            ("saturation_scale", self.saturation_scale),
        ] {
            if !(0.0..=MAX_SCALE).contains(&scale) {
                return Err(Error::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be between 0.0 and {MAX_SCALE}"),
                });
            }
        }

        if !(1..=100).contains(&self.output_quality) {
            return Err(Error::InvalidParameter {
                name: "output_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }

    /// Whether applying this configuration leaves colors unchanged.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.hue_shift_degrees % 360.0 == 0.0
            && self.lightness_scale == 1.0
            && self.saturation_scale == 1.0
    }
}

/// Apply `config` to a `(..., 3, H, W)` HLS tensor.
///
/// The hue is rotated without wrapping, since HLS to RGB conversion is
/// periodic in hue. Lightness and saturation are scaled and clamped to [0, 1].
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the tensor has no 3-long channel axis.
pub fn adjust_hls<A, S, D>(hls: &ArrayBase<S, D>, config: &Config) -> Result<Array<A, D>>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = channel_axis(hls.shape())?;
    let mut out = hls.to_owned();

    {
        let mut planes = out.view_mut().into_dyn();

        let shift = A::cast(f64::from(config.hue_shift_degrees).to_radians());
        planes.index_axis_mut(axis, 0).mapv_inplace(|h| h + shift);

        for (channel, scale) in [(1, config.lightness_scale), (2, config.saturation_scale)] {
            scale_clamped(&mut planes, axis, channel, A::cast(f64::from(scale)));
        }
    }

    Ok(out)
}

fn scale_clamped<A: Scalar>(
    planes: &mut ArrayViewMutD<'_, A>,
    axis: Axis,
    channel: usize,
    scale: A,
) {
    let (zero, one) = (A::zero(), A::one());
    planes.index_axis_mut(axis, channel).mapv_inplace(|v| {
        let v = v * scale;
        if v < zero {
            zero
        } else if v > one {
            one
        } else {
            v
        }
    });
}
