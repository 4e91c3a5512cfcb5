// gradgraph-core/src/ops/activation/gelu.rs

use crate::error::GraphError;
use crate::ops::{apply_unary_op, unary_backward};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_2_SQRT_PI};

/// `1 / sqrt(2π)`
const FRAC_1_SQRT_2PI: f64 = 0.5 * FRAC_2_SQRT_PI * FRAC_1_SQRT_2;

/// Exact GELU: `0.5 · x · (1 + erf(x / √2))`.
pub fn gelu<T: Scalar>(x: T) -> T {
    let half = T::from_f64(0.5);
    half * x * (T::one() + (x * T::from_f64(FRAC_1_SQRT_2)).erf())
}

/// Derivative of the exact GELU:
/// `(1 + erf(x / √2)) / 2 + x · exp(−x² / 2) / √(2π)`.
pub fn gelu_derivative<T: Scalar>(x: T) -> T {
    let half = T::from_f64(0.5);
    let cdf = half * (T::one() + (x * T::from_f64(FRAC_1_SQRT_2)).erf());
    let pdf = (-(x * x) * half).exp() * T::from_f64(FRAC_1_SQRT_2PI);
    cdf + x * pdf
}

// --- Forward Operation ---

pub(crate) fn gelu_forward<T: Scalar>(a: &Tensor<T>, out: &mut Tensor<T>) -> Result<(), GraphError> {
    apply_unary_op(a, out, gelu, "gelu")
}

// --- Backward Operation ---

pub(crate) fn gelu_backward<T: Scalar>(
    a: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    unary_backward(a, grad_output, |x, g| g * gelu_derivative(x), "gelu")
}

#[cfg(test)]
#[path = "gelu_test.rs"]
mod tests;
