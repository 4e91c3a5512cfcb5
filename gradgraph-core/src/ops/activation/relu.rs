use crate::error::GraphError;
use crate::ops::{apply_unary_op, unary_backward};
use crate::tensor::Tensor;
use crate::types::Scalar;

// --- Forward Operation ---

/// Applies the Rectified Linear Unit element-wise.
/// ReLU(x) = max(0, x)
pub(crate) fn relu_forward<T: Scalar>(a: &Tensor<T>, out: &mut Tensor<T>) -> Result<(), GraphError> {
    apply_unary_op(a, out, |x| if x > T::zero() { x } else { T::zero() }, "relu")
}

// --- Backward Operation ---

/// grad = upstream where input > 0, else 0.
///
/// The subgradient at exactly zero is taken as 0.
pub(crate) fn relu_backward<T: Scalar>(
    a: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    unary_backward(
        a,
        grad_output,
        |x, g| if x > T::zero() { g } else { T::zero() },
        "relu",
    )
}

// --- Tests ---

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
