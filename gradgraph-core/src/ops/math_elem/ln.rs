// gradgraph-core/src/ops/math_elem/ln.rs

use crate::error::GraphError;
use crate::ops::{apply_unary_op, unary_backward};
use crate::tensor::Tensor;
use crate::types::Scalar;

// --- Forward Operation ---

/// Computes the element-wise natural logarithm (base \( e \)).
///
/// # Domain Considerations
/// The natural logarithm is only defined for strictly positive numbers.
/// Inputs are not checked: `ln(0)` yields `-inf` and negative inputs yield
/// `NaN`, which then propagate through the rest of the graph.
pub(crate) fn ln_forward<T: Scalar>(a: &Tensor<T>, out: &mut Tensor<T>) -> Result<(), GraphError> {
    apply_unary_op(a, out, |x| x.ln(), "log")
}

// --- Backward Operation ---

/// Computes the gradient for \( z = \ln(a) \).
///
/// Using the chain rule \( \frac{dL}{da} = \frac{dL}{dz} \cdot \frac{1}{a} \),
/// evaluated element by element on the input.
pub(crate) fn ln_backward<T: Scalar>(
    a: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    unary_backward(a, grad_output, |x, g| g / x, "log")
}

// --- Tests ---
#[cfg(test)]
#[path = "ln_test.rs"]
mod tests; // Link to the test file
