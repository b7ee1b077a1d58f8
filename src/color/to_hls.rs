//! RGB to HLS conversion.

use std::f64::consts::{FRAC_PI_3, TAU};

use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension, IxDyn, Zip};

use crate::error::Result;
use crate::ops::{equal, guard_denominator, maximum, minimum, select, wrap};
use crate::scalar::Scalar;

use super::{split_planes, stack_planes};

/// Convert an RGB tensor to HLS.
///
/// Input is a `(..., 3, H, W)` tensor with R, G, B planes in [0, 1]. The
/// output has the same shape with planes:
///
/// * hue in radians, in `[0, 2π)`
/// * lightness in [0, 1]
/// * saturation in [0, 1]
///
/// Achromatic pixels (`r == g == b`) get hue 0 and saturation 0. When several
/// channels share the maximum, red wins over green and green over blue.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if the
/// tensor has no 3-long channel axis.
pub fn rgb_to_hls<A, S, D>(image: &ArrayBase<S, D>) -> Result<Array<A, D>>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (axis, [r, g, b]) = split_planes(image)?;
    tracing::debug!(shape = ?image.shape(), "converting RGB to HLS");

    let maxc = maximum(&maximum(&r, &g), &b);
    let minc = minimum(&minimum(&r, &g), &b);
    let delta = &maxc - &minc;
    let sum = &maxc + &minc;

    let half = A::cast(0.5);
    let lightness = sum.mapv(|v| v * half);

    let achromatic = delta.mapv(|d| d == A::zero());
    let zeros = delta.mapv(|_| A::zero());

    let saturation = {
        let two = A::cast(2.0);
        let dark = lightness.mapv(|l| l <= half);
        let below = &delta / &guard_denominator(&sum, &achromatic);
        let above = &delta / &guard_denominator(&sum.mapv(|v| two - v), &achromatic);
        select(&achromatic, &zeros, &select(&dark, &below, &above))
    };

    let hue = {
        let delta = guard_denominator(&delta, &achromatic);
        let sector = hue_sector(&r, &g, &b, &maxc, &delta);
        let radians = sector.mapv(|v| v * A::cast(FRAC_PI_3));
        select(&achromatic, &zeros, &wrap(&radians, A::cast(TAU)))
    };

    stack_planes(axis, &[hue, lightness, saturation])
}

/// Hue in sixths of a turn, `[0, 6)`, picked by whichever channel is largest.
fn hue_sector<A, S>(
    r: &ArrayBase<S, IxDyn>,
    g: &ArrayBase<S, IxDyn>,
    b: &ArrayBase<S, IxDyn>,
    maxc: &ArrayD<A>,
    delta: &ArrayD<A>,
) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
{
    let offset = |plane: ArrayD<A>, by: f64| plane.mapv(|v| v + A::cast(by));

    let red = wrap(&((g - b) / delta), A::cast(6.0));
    let green = offset((b - r) / delta, 2.0);
    let blue = offset((r - g) / delta, 4.0);

    let red_max = equal(r, maxc);
    let green_max = Zip::from(&red_max)
        .and(&equal(g, maxc))
        .map_collect(|&red, &green| !red && green);

    select(&red_max, &red, &select(&green_max, &green, &blue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr3, Array3, Axis};
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    /// Scalar HLS reference in the conventional form: hue in degrees.
    fn reference_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        let l = (maxc + minc) / 2.0;
        if maxc == minc {
            return (0.0, l, 0.0);
        }
        let delta = maxc - minc;
        let s = if l <= 0.5 {
            delta / (maxc + minc)
        } else {
            delta / (2.0 - maxc - minc)
        };
        let h = if r == maxc {
            60.0 * (g - b) / delta
        } else if g == maxc {
            60.0 * (b - r) / delta + 120.0
        } else {
            60.0 * (r - g) / delta + 240.0
        };
        let h = if h < 0.0 { h + 360.0 } else { h };
        (h, l, s)
    }

    fn pixel(r: f64, g: f64, b: f64) -> Array3<f64> {
        arr3(&[[[r]], [[g]], [[b]]])
    }

    #[test]
    fn test_matches_reference() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let data = Array3::from_shape_fn((3, 5, 5), |_| rng.random::<f64>());

        let hls = rgb_to_hls(&data).unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let (h, l, s) =
                    reference_hls(data[[0, y, x]], data[[1, y, x]], data[[2, y, x]]);
                let h = 2.0 * PI * h / 360.0;
                assert!((hls[[0, y, x]] - h).abs() < 1e-4, "hue at ({y}, {x})");
                assert!((hls[[1, y, x]] - l).abs() < 1e-4, "lightness at ({y}, {x})");
                assert!((hls[[2, y, x]] - s).abs() < 1e-4, "saturation at ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_matches_reference_f32() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let data = Array3::from_shape_fn((3, 5, 5), |_| rng.random::<f32>());

        let hls = rgb_to_hls(&data).unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let (h, l, s) = reference_hls(
                    f64::from(data[[0, y, x]]),
                    f64::from(data[[1, y, x]]),
                    f64::from(data[[2, y, x]]),
                );
                let hue = hls[[0, y, x]];
                assert!((0.0..std::f32::consts::TAU).contains(&hue), "hue {hue} out of range");
                assert!((f64::from(hue) - h.to_radians()).abs() < 1e-4, "hue at ({y}, {x})");
                assert!((f64::from(hls[[1, y, x]]) - l).abs() < 1e-4, "lightness at ({y}, {x})");
                assert!((f64::from(hls[[2, y, x]]) - s).abs() < 1e-4, "saturation at ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_nan_propagates() {
        let cases = [
            pixel(0.5, f64::NAN, 0.2),
            pixel(0.5, 0.3, f64::NAN),
            pixel(f64::NAN, 0.3, 0.2),
        ];
        for rgb in cases {
            let hls = rgb_to_hls(&rgb).unwrap();
            assert!(hls.iter().all(|v| v.is_nan()), "{hls:?}");
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let data = Array3::from_shape_fn((3, 5, 5), |_| rng.random::<f32>());
        let expected = rgb_to_hls(&data).unwrap();

        let batch = ndarray::stack(Axis(0), &[data.view(), data.view()]).unwrap();
        let actual = rgb_to_hls(&batch).unwrap();

        assert_eq!(actual.index_axis(Axis(0), 0), expected);
        assert_eq!(actual.index_axis(Axis(0), 1), expected);
    }

    #[test]
    fn test_primaries() {
        let hue = |r, g, b| rgb_to_hls(&pixel(r, g, b)).unwrap()[[0, 0, 0]];
        assert!(hue(1.0, 0.0, 0.0).abs() < 1e-12);
        assert!((hue(0.0, 1.0, 0.0) - 2.0 * PI / 3.0).abs() < 1e-12);
        assert!((hue(0.0, 0.0, 1.0) - 4.0 * PI / 3.0).abs() < 1e-12);
        assert!((hue(1.0, 0.0, 1.0) - 5.0 * PI / 3.0).abs() < 1e-12);

        let red = rgb_to_hls(&pixel(1.0, 0.0, 0.0)).unwrap();
        assert!((red[[1, 0, 0]] - 0.5).abs() < 1e-12);
        assert!((red[[2, 0, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_achromatic_is_zero_hue_and_saturation() {
        for level in [0.0, 0.3, 0.5, 1.0] {
            let hls = rgb_to_hls(&pixel(level, level, level)).unwrap();
            assert_eq!(hls[[0, 0, 0]], 0.0);
            assert!((hls[[1, 0, 0]] - level).abs() < 1e-12);
            assert_eq!(hls[[2, 0, 0]], 0.0);
        }
    }

    #[test]
    fn test_hue_stays_below_full_turn() {
        // red is max and blue barely above green: sector is just under 6
        let hls = rgb_to_hls(&pixel(1.0, 0.2, 0.2 + 1e-16)).unwrap();
        let h = hls[[0, 0, 0]];
        assert!((0.0..TAU).contains(&h), "hue {h}");
    }

    #[test]
    fn test_tie_prefers_red_then_green() {
        // r == g is max: red branch gives (g - b) / delta = 1, i.e. 60 degrees
        let hls = rgb_to_hls(&pixel(0.8, 0.8, 0.2)).unwrap();
        assert!((hls[[0, 0, 0]] - PI / 3.0).abs() < 1e-12);

        // g == b is max: green branch gives (b - r) / delta + 2 = 3
        let hls = rgb_to_hls(&pixel(0.2, 0.8, 0.8)).unwrap();
        assert!((hls[[0, 0, 0]] - PI).abs() < 1e-12);
    }
}
