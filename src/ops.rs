//! Masked element-wise primitives over channel planes.
//!
//! The conversion kernels never branch on pixel values. Every conditional is
//! evaluated for all elements and resolved with [`select`], so each element's
//! value and derivative only depend on its own branch.

use ndarray::{ArrayBase, ArrayD, Axis, Data, IxDyn, Zip};

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Number of color channels in an RGB or HLS tensor.
pub const CHANNELS: usize = 3;

/// Boolean mask over a channel plane.
pub type Mask = ArrayD<bool>;

/// Locate the channel axis of a `(..., 3, H, W)` tensor.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the tensor has fewer than three axes
/// or its third-from-last axis is not of length 3.
pub fn channel_axis(shape: &[usize]) -> Result<Axis> {
    if shape.len() < 3 {
        return Err(Error::ShapeMismatch {
            expected: "(..., 3, H, W)".to_string(),
            actual: format!("{shape:?}"),
        });
    }

    let axis = shape.len() - 3;
    if shape[axis] != CHANNELS {
        return Err(Error::ShapeMismatch {
            expected: format!("{CHANNELS} channels on axis {axis}"),
            actual: format!("{} channels in {shape:?}", shape[axis]),
        });
    }

    Ok(Axis(axis))
}

/// Per-element `mask ? on_true : on_false`.
pub fn select<A, M, T, F>(
    mask: &ArrayBase<M, IxDyn>,
    on_true: &ArrayBase<T, IxDyn>,
    on_false: &ArrayBase<F, IxDyn>,
) -> ArrayD<A>
where
    A: Scalar,
    M: Data<Elem = bool>,
    T: Data<Elem = A>,
    F: Data<Elem = A>,
{
    Zip::from(mask)
        .and(on_true)
        .and(on_false)
        .map_collect(|&m, &t, &f| if m { t } else { f })
}

/// Element-wise maximum. Ties resolve to `a`; a NaN in either argument
/// propagates.
pub fn maximum<A, S, T>(a: &ArrayBase<S, IxDyn>, b: &ArrayBase<T, IxDyn>) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
    T: Data<Elem = A>,
{
    let mask = Zip::from(a)
        .and(b)
        .map_collect(|&a, &b| a >= b || a.is_nan());
    select(&mask, a, b)
}

/// Element-wise minimum. Ties resolve to `a`; a NaN in either argument
/// propagates.
pub fn minimum<A, S, T>(a: &ArrayBase<S, IxDyn>, b: &ArrayBase<T, IxDyn>) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
    T: Data<Elem = A>,
{
    let mask = Zip::from(a)
        .and(b)
        .map_collect(|&a, &b| a <= b || a.is_nan());
    select(&mask, a, b)
}

/// Mask of positions where `a == b`.
pub fn equal<A, S, T>(a: &ArrayBase<S, IxDyn>, b: &ArrayBase<T, IxDyn>) -> Mask
where
    A: Scalar,
    S: Data<Elem = A>,
    T: Data<Elem = A>,
{
    Zip::from(a).and(b).map_collect(|&a, &b| a == b)
}

/// Floored modulo into `[0, period)`.
///
/// Unlike `%`, negative inputs wrap to the positive side.
pub fn wrap<A, S>(x: &ArrayBase<S, IxDyn>, period: A) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
{
    x.mapv(|v| {
        let w = v - period * (v / period).floor();
        // `v` just below zero rounds up to exactly `period`
        if w < period { w } else { w - period }
    })
}

/// Replace `denominator` with one wherever `mask` is set.
///
/// Masked positions are discarded by a later [`select`]; the substitution
/// keeps their values and derivatives finite in the meantime.
pub fn guard_denominator<A, S, M>(
    denominator: &ArrayBase<S, IxDyn>,
    mask: &ArrayBase<M, IxDyn>,
) -> ArrayD<A>
where
    A: Scalar,
    S: Data<Elem = A>,
    M: Data<Elem = bool>,
{
    Zip::from(mask)
        .and(denominator)
        .map_collect(|&m, &d| if m { A::one() } else { d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array3};

    #[test]
    fn test_channel_axis() {
        assert_eq!(channel_axis(&[3, 5, 5]).unwrap(), Axis(0));
        assert_eq!(channel_axis(&[2, 3, 5, 5]).unwrap(), Axis(1));
        assert_eq!(channel_axis(&[4, 2, 3, 1, 1]).unwrap(), Axis(2));
    }

    #[test]
    fn test_channel_axis_rejects_bad_shapes() {
        assert!(matches!(channel_axis(&[3, 5]), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(
            channel_axis(&[1, 4, 5, 5]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(channel_axis(&[]), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_select() {
        let mask = arr1(&[true, false, true]).into_dyn();
        let a = arr1(&[1.0_f32, 2.0, 3.0]).into_dyn();
        let b = arr1(&[-1.0_f32, -2.0, -3.0]).into_dyn();
        assert_eq!(select(&mask, &a, &b), arr1(&[1.0, -2.0, 3.0]).into_dyn());
    }

    #[test]
    fn test_maximum_minimum() {
        let a = arr1(&[1.0_f64, 5.0, 2.0]).into_dyn();
        let b = arr1(&[3.0_f64, 4.0, 2.0]).into_dyn();
        assert_eq!(maximum(&a, &b), arr1(&[3.0, 5.0, 2.0]).into_dyn());
        assert_eq!(minimum(&a, &b), arr1(&[1.0, 4.0, 2.0]).into_dyn());
    }

    #[test]
    fn test_maximum_minimum_propagate_nan() {
        let a = arr1(&[f64::NAN, 0.5, f64::NAN]).into_dyn();
        let b = arr1(&[0.5, f64::NAN, f64::NAN]).into_dyn();
        assert!(maximum(&a, &b).iter().all(|v| v.is_nan()));
        assert!(minimum(&a, &b).iter().all(|v| v.is_nan()));
        assert!(maximum(&b, &a).iter().all(|v| v.is_nan()));
        assert!(minimum(&b, &a).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_wrap_nan_stays_nan() {
        let x = arr1(&[f32::NAN]).into_dyn();
        assert!(wrap(&x, 1.0)[[0]].is_nan());
    }

    #[test]
    fn test_wrap_negative_and_large() {
        let x = arr1(&[-1.0_f64, 0.0, 5.5, 6.0, 13.0]).into_dyn();
        let w = wrap(&x, 6.0);
        assert_eq!(w, arr1(&[5.0, 0.0, 5.5, 0.0, 1.0]).into_dyn());
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let x = arr1(&[-1e-18_f64]).into_dyn();
        let w = wrap(&x, 6.0);
        assert!(w[[0]] >= 0.0 && w[[0]] < 6.0);
    }

    #[test]
    fn test_guard_denominator() {
        let d = Array3::<f32>::zeros((1, 2, 2)).into_dyn();
        let mut mask = Array3::from_elem((1, 2, 2), true).into_dyn();
        mask[[0, 1, 1]] = false;
        let guarded = guard_denominator(&d, &mask);
        assert_eq!(guarded[[0, 0, 0]], 1.0);
        assert_eq!(guarded[[0, 1, 1]], 0.0);
    }
}
