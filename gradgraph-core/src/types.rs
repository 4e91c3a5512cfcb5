use num_traits::{Float, NumAssignOps, NumOps};
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// A trait representing the element types usable in gradgraph tensors.
///
/// The whole engine is generic over a single `Scalar`, so precision can be
/// swapped (`f32` for regular use, `f64` for reproducibility and gradient
/// checking) without touching the kernels.
///
/// Besides the usual float operations provided by [`Float`], kernels need the
/// Gauss error function for GELU, which `num_traits` does not provide.
pub trait Scalar:
    Float // Includes Num + Copy + NumCast + PartialOrd, exp/ln/sqrt/max
    + NumAssignOps // AddAssign, SubAssign, MulAssign, DivAssign
    + NumOps
    + Sum
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// Gauss error function.
    fn erf(self) -> Self;

    /// Converts an `f64` constant into this type.
    ///
    /// Every `Scalar` is a float wide enough to represent (a rounding of) any
    /// finite `f64`, so the conversion cannot fail.
    fn from_f64(value: f64) -> Self;
}

impl Scalar for f32 {
    fn erf(self) -> Self {
        libm::erff(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Scalar for f64 {
    fn erf(self) -> Self {
        libm::erf(self)
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}
