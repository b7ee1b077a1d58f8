//! Forward-mode dual numbers.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use crate::scalar::Scalar;

/// A value paired with its derivative along one seeded direction.
///
/// Equality and ordering look at `value` only, so masks computed on dual
/// tensors match those computed on plain floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dual {
    /// Primal value.
    pub value: f64,
    /// Derivative with respect to the seeded input.
    pub grad: f64,
}

impl Dual {
    /// A constant: zero derivative.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self { value, grad: 0.0 }
    }

    /// An input seeded with unit derivative.
    #[must_use]
    pub const fn variable(value: f64) -> Self {
        Self { value, grad: 1.0 }
    }
}

impl PartialEq for Dual {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            grad: self.grad + rhs.grad,
        }
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            grad: self.grad - rhs.grad,
        }
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            grad: self.grad.mul_add(rhs.value, self.value * rhs.grad),
        }
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self {
            value: self.value / rhs.value,
            grad: self.grad.mul_add(rhs.value, -self.value * rhs.grad) / (rhs.value * rhs.value),
        }
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            value: -self.value,
            grad: -self.grad,
        }
    }
}

impl Rem for Dual {
    type Output = Self;

    // a - b * trunc(a / b), with the quotient held piecewise constant
    fn rem(self, rhs: Self) -> Self {
        let quotient = (self.value / rhs.value).trunc();
        Self {
            value: self.value % rhs.value,
            grad: rhs.grad.mul_add(-quotient, self.grad),
        }
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl FromPrimitive for Dual {
    fn from_i64(n: i64) -> Option<Self> {
        n.to_f64().map(Self::constant)
    }

    fn from_u64(n: u64) -> Option<Self> {
        n.to_f64().map(Self::constant)
    }

    fn from_f64(n: f64) -> Option<Self> {
        Some(Self::constant(n))
    }
}

// Conversions read the primal value and drop the derivative.
impl ToPrimitive for Dual {
    fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.value)
    }
}

impl Scalar for Dual {
    fn cast(value: f64) -> Self {
        Self::constant(value)
    }

    // piecewise constant
    fn floor(self) -> Self {
        Self::constant(self.value.floor())
    }

    fn is_finite(self) -> bool {
        self.value.is_finite() && self.grad.is_finite()
    }

    fn is_nan(self) -> bool {
        self.value.is_nan()
    }
}
