//! # Operator Kernels (`ops`)
//!
//! Numerical kernels for every operator a graph node can hold. Operators are
//! grouped into submodules by family; each operator file provides a forward
//! kernel (writing into a preallocated output tensor) and a backward kernel
//! (returning the local-gradient contribution for each operand).
//!
//! Kernels never look at the graph. The forward evaluator and the
//! differentiator resolve operand ids into tensors and call in here.
//!
//! ## Submodules:
//!
//! - [`linalg`]: matrix product.
//! - [`arithmetic`]: elementwise add, scalar mul.
//! - [`math_elem`]: elementwise natural logarithm.
//! - [`view`]: reshape.
//! - [`activation`]: relu, gelu, softmax.

use crate::error::GraphError;
use crate::tensor::Tensor;
use crate::types::Scalar;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod view;

/// Applies an elementwise function from `input` into `out`.
///
/// Both tensors must hold the same number of elements; construction
/// guarantees it, so a mismatch here is a defect.
pub(crate) fn apply_unary_op<T, F>(
    input: &Tensor<T>,
    out: &mut Tensor<T>,
    op: F,
    op_name: &str,
) -> Result<(), GraphError>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    check_same_numel(input, out, op_name)?;
    out.data
        .iter_mut()
        .zip(input.data.iter())
        .for_each(|(o, &x)| *o = op(x));
    Ok(())
}

/// Builds the gradient of an elementwise operator with respect to its input.
///
/// `local` receives `(x, upstream)` for each element, where `x` is the
/// operator's input value, and returns the contribution to `∂input`.
pub(crate) fn unary_backward<T, F>(
    input: &Tensor<T>,
    grad_output: &Tensor<T>,
    local: F,
    op_name: &str,
) -> Result<Tensor<T>, GraphError>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    check_same_numel(input, grad_output, op_name)?;
    let data = input
        .data
        .iter()
        .zip(grad_output.data.iter())
        .map(|(&x, &g)| local(x, g))
        .collect();
    Tensor::new(data, input.shape)
}

fn check_same_numel<T: Scalar>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    op_name: &str,
) -> Result<(), GraphError> {
    if a.numel() != b.numel() {
        return Err(GraphError::InternalError(format!(
            "{}: operand holds {} elements but the output holds {}",
            op_name,
            a.numel(),
            b.numel()
        )));
    }
    Ok(())
}
