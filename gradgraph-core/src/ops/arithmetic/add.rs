// gradgraph-core/src/ops/arithmetic/add.rs

use crate::error::GraphError;
use crate::tensor::Tensor;
use crate::types::Scalar;

// --- Forward Operation ---

/// Elementwise addition `out = a + b` over the flat buffers.
///
/// Broadcasting is not supported: construction proved `a`, `b` and `out`
/// share one shape.
pub(crate) fn add_forward<T: Scalar>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    out: &mut Tensor<T>,
) -> Result<(), GraphError> {
    if a.shape != b.shape || a.shape != out.shape {
        return Err(GraphError::InternalError(format!(
            "add: inconsistent shapes {} + {} -> {}",
            a.shape, b.shape, out.shape
        )));
    }
    for ((o, &x), &y) in out.data.iter_mut().zip(a.data.iter()).zip(b.data.iter()) {
        *o = x + y;
    }
    Ok(())
}

// --- Backward Operation ---

/// Local gradients of `a + b`: the upstream gradient flows unchanged to both
/// operands.
pub(crate) fn add_backward<T: Scalar>(grad_output: &Tensor<T>) -> (Tensor<T>, Tensor<T>) {
    (grad_output.clone(), grad_output.clone())
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
