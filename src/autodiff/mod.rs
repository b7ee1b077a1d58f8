//! Forward-mode differentiation and gradient checking.
//!
//! The conversion kernels are generic over [`Scalar`](crate::Scalar), so
//! running them on [`Dual`] tensors yields exact derivatives. [`gradcheck`]
//! compares those against central finite differences.

mod dual;

pub use dual::Dual;

use ndarray::{Array2, ArrayD};

use crate::color::ColorTransform;
use crate::error::{Error, Result};

/// Tolerances for [`gradcheck`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheck {
    /// Finite-difference step.
    pub eps: f64,

    /// Absolute tolerance.
    pub atol: f64,

    /// Relative tolerance, scaled by the numeric derivative.
    pub rtol: f64,
}

impl Default for GradCheck {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            atol: 1e-5,
            rtol: 1e-3,
        }
    }
}

/// Jacobian of `f` at `input` by forward-mode differentiation.
///
/// Rows index outputs and columns index inputs, both in logical (row-major)
/// element order. One pass of `f` is made per input element.
///
/// # Errors
///
/// Propagates any error returned by `f`.
pub fn jacobian<F>(f: F, input: &ArrayD<f64>) -> Result<Array2<f64>>
where
    F: Fn(&ArrayD<Dual>) -> Result<ArrayD<Dual>>,
{
    let primal = input.mapv(Dual::constant);
    let mut jac: Option<Array2<f64>> = None;

    for col in 0..input.len() {
        let mut seeded = primal.clone();
        if let Some(x) = seeded.iter_mut().nth(col) {
            x.grad = 1.0;
        }

        let output = f(&seeded)?;
        let jac = jac.get_or_insert_with(|| Array2::zeros((output.len(), input.len())));
        for (row, y) in output.iter().enumerate() {
            jac[[row, col]] = y.grad;
        }
    }

    Ok(jac.unwrap_or_else(|| Array2::zeros((0, 0))))
}

/// Jacobian of `f` at `input` by central differences with step `eps`.
///
/// # Errors
///
/// Propagates any error returned by `f`.
pub fn numerical_jacobian<F>(f: F, input: &ArrayD<f64>, eps: f64) -> Result<Array2<f64>>
where
    F: Fn(&ArrayD<f64>) -> Result<ArrayD<f64>>,
{
    let mut jac: Option<Array2<f64>> = None;

    for col in 0..input.len() {
        let nudged = |step: f64| {
            let mut x = input.clone();
            if let Some(v) = x.iter_mut().nth(col) {
                *v += step;
            }
            f(&x)
        };
        let plus = nudged(eps)?;
        let minus = nudged(-eps)?;

        let jac = jac.get_or_insert_with(|| Array2::zeros((plus.len(), input.len())));
        for (row, (p, m)) in plus.iter().zip(minus.iter()).enumerate() {
            jac[[row, col]] = (p - m) / (2.0 * eps);
        }
    }

    Ok(jac.unwrap_or_else(|| Array2::zeros((0, 0))))
}

/// Check the forward-mode derivatives of `transform` against finite
/// differences at `input`.
///
/// An entry passes when `|analytic - numeric| <= atol + rtol * |numeric|`
/// and the analytic value is finite.
///
/// # Errors
///
/// Returns [`Error::GradientMismatch`] for the first failing entry, or any
/// error from the transform itself.
pub fn gradcheck<T>(transform: &T, input: &ArrayD<f64>, config: &GradCheck) -> Result<()>
where
    T: ColorTransform,
{
    let analytic = jacobian(|x| transform.apply(x), input)?;
    let numeric = numerical_jacobian(|x| transform.apply(x), input, config.eps)?;

    for ((row, col), &a) in analytic.indexed_iter() {
        let n = numeric[[row, col]];
        if !a.is_finite() || (a - n).abs() > config.rtol.mul_add(n.abs(), config.atol) {
            return Err(Error::GradientMismatch {
                output: row,
                input: col,
                analytic: a,
                numeric: n,
            });
        }
    }

    tracing::debug!(
        outputs = analytic.nrows(),
        inputs = analytic.ncols(),
        "gradient check passed"
    );
    Ok(())
}
