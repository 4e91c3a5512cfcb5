// gradgraph-core/src/ops/arithmetic/mul.rs

use crate::error::GraphError;
use crate::ops::{apply_unary_op, unary_backward};
use crate::tensor::Tensor;
use crate::types::Scalar;

// --- Forward Operation ---

/// Scales every element by a constant: `out = a * factor`.
pub(crate) fn mul_forward<T: Scalar>(
    a: &Tensor<T>,
    factor: T,
    out: &mut Tensor<T>,
) -> Result<(), GraphError> {
    apply_unary_op(a, out, |x| x * factor, "mul")
}

// --- Backward Operation ---

/// Local gradient of `a * factor`: `∂a = factor * grad_output`.
pub(crate) fn mul_backward<T: Scalar>(
    a: &Tensor<T>,
    factor: T,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    unary_backward(a, grad_output, |_, g| factor * g, "mul")
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
