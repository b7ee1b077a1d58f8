//! HLS to RGB conversion.

use std::f64::consts::TAU;

use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension, IxDyn, Zip};

use crate::error::Result;
use crate::ops::{select, wrap};
use crate::scalar::Scalar;

use super::{split_planes, stack_planes};

/// Hue offsets, in turns, of the red, green and blue channels.
const CHANNEL_OFFSETS: [f64; 3] = [1.0 / 3.0, 0.0, -1.0 / 3.0];

/// Convert an HLS tensor to RGB.
///
/// Input is a `(..., 3, H, W)` tensor with hue in radians (any real value,
/// taken modulo 2π), lightness and saturation in [0, 1]. Output has R, G, B
/// planes in [0, 1]; values are not clamped.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if the
/// tensor has no 3-long channel axis.
pub fn hls_to_rgb<A, S, D>(image: &ArrayBase<S, D>) -> Result<Array<A, D>>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (axis, [h, l, s]) = split_planes(image)?;
    tracing::debug!(shape = ?image.shape(), "converting HLS to RGB");

    let one = A::one();
    let half = A::cast(0.5);

    let q = {
        let dark = l.mapv(|l| l < half);
        let below = &l * &s.mapv(|s| one + s);
        let above = &(&l + &s) - &(&l * &s);
        select(&dark, &below, &above)
    };
    let p = &l.mapv(|l| l + l) - &q;

    let turns = wrap(&h.mapv(|h| h / A::cast(TAU)), one);
    let achromatic = s.mapv(|s| s == A::zero());

    let [red, green, blue] = CHANNEL_OFFSETS.map(|offset| {
        let t = wrap(&turns.mapv(|v| v + A::cast(offset)), one);
        select(&achromatic, &l, &hue_to_channel(&p, &q, &t))
    });

    stack_planes(axis, &[red, green, blue])
}

/// Piecewise-linear channel intensity at hue position `t` in `[0, 1)`.
fn hue_to_channel<A, S>(p: &ArrayD<A>, q: &ArrayD<A>, t: &ArrayBase<S, IxDyn>) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
{
    let six = A::cast(6.0);
    let two_thirds = A::cast(2.0 / 3.0);

    let rising = Zip::from(p)
        .and(q)
        .and(t)
        .map_collect(|&p, &q, &t| p + (q - p) * six * t);
    let falling = Zip::from(p)
        .and(q)
        .and(t)
        .map_collect(|&p, &q, &t| p + (q - p) * (two_thirds - t) * six);

    let below = |edge: f64| t.mapv(|t| t < A::cast(edge));
    let flat_low = t.mapv(|t| t >= two_thirds);

    // a NaN `t` fails every comparison and lands on `falling`, which carries it
    select(
        &below(1.0 / 6.0),
        &rising,
        &select(&below(0.5), q, &select(&flat_low, p, &falling)),
    )
}
