//! Element trait for the `d` (f64) and `z` (Complex<f64>) kernels.

use num_complex::Complex64;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Field element accepted by the generic triangular solve and LU routines.
///
/// Both implementors are `#[repr(C)]`-compatible with the caller's buffers:
/// `f64` is 8 bytes, `Complex64` is an interleaved `(re, im)` pair of 16 bytes.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    const ZERO: Self;
    const ONE: Self;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// `|re| + |im|`, the magnitude LAPACK's `i?amax` pivots on.
    fn abs1(self) -> f64;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline(always)]
    fn conj(self) -> Self {
        self
    }

    #[inline(always)]
    fn abs1(self) -> f64 {
        self.abs()
    }
}

impl Scalar for Complex64 {
    const ZERO: Self = Complex64::new(0.0, 0.0);
    const ONE: Self = Complex64::new(1.0, 0.0);

    #[inline(always)]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    #[inline(always)]
    fn abs1(self) -> f64 {
        self.re.abs() + self.im.abs()
    }
}
