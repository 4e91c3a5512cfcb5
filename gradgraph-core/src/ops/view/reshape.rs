use crate::error::GraphError;
use crate::tensor::Tensor;
use crate::types::Scalar;

/// Copies the elements of `a` into `out`, which carries the new shape.
///
/// Tensors here are always contiguous, so a reshape is a plain element copy;
/// only the shape metadata differs.
///
/// # Errors
/// Returns `GraphError::InternalError` if the element counts differ, which
/// the reshape constructor rules out.
pub(crate) fn reshape_forward<T: Scalar>(
    a: &Tensor<T>,
    out: &mut Tensor<T>,
) -> Result<(), GraphError> {
    out.copy_from_slice(&a.data).map_err(|_| {
        GraphError::InternalError(format!(
            "reshape: cannot copy {} into {}",
            a.shape, out.shape
        ))
    })
}

/// The gradient of a reshape is the upstream gradient viewed in the input's shape.
pub(crate) fn reshape_backward<T: Scalar>(
    a: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    Tensor::new(grad_output.data.clone(), a.shape).map_err(|_| {
        GraphError::InternalError(format!(
            "reshape backward: gradient of shape {} does not fit {}",
            grad_output.shape, a.shape
        ))
    })
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
