//! Element trait shared by every conversion kernel.

use std::fmt::Debug;
use std::ops::Neg;

use num_traits::{Float, FromPrimitive, NumOps, One, ToPrimitive, Zero};

/// A real-valued tensor element.
///
/// Implemented for `f32`, `f64` and [`Dual`](crate::autodiff::Dual), so the
/// same kernel yields plain values or forward-mode derivatives depending on
/// the element type it runs on. Comparisons must order by the primal value.
///
/// Arithmetic, `zero`/`one` and primitive conversions come from `num-traits`;
/// this trait adds what the kernels need on top.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Send
    + Sync
    + Zero
    + One
    + NumOps
    + Neg<Output = Self>
    + FromPrimitive
    + ToPrimitive
    + 'static
{
    /// Converts an `f64` constant into this element type.
    ///
    /// Unlike [`FromPrimitive::from_f64`] this never fails: values outside
    /// the target range saturate as an `as` cast would.
    fn cast(value: f64) -> Self;

    /// Largest integer value not greater than `self`.
    #[must_use]
    fn floor(self) -> Self;

    /// Whether the value (and any carried derivative) is finite.
    fn is_finite(self) -> bool;

    /// Whether the primal value is NaN.
    fn is_nan(self) -> bool;
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn cast(value: f64) -> Self {
                <$t as FromPrimitive>::from_f64(value).unwrap_or_else(<$t as Float>::nan)
            }

            #[inline]
            fn floor(self) -> Self {
                Float::floor(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                Float::is_finite(self)
            }

            #[inline]
            fn is_nan(self) -> bool {
                Float::is_nan(self)
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);
