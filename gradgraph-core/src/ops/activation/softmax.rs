// gradgraph-core/src/ops/activation/softmax.rs

use crate::error::GraphError;
use crate::tensor::Tensor;
use crate::types::Scalar;

// --- Forward Operation ---

/// Softmax over the entire flat buffer, treated as one distribution.
///
/// The maximum is subtracted before exponentiating so that large inputs do
/// not overflow:
/// \\[ s_i = \frac{e^{x_i - \max(x)}}{\sum_j e^{x_j - \max(x)}} \\]
///
/// There is no per-row or per-axis variant.
pub(crate) fn softmax_forward<T: Scalar>(
    a: &Tensor<T>,
    out: &mut Tensor<T>,
) -> Result<(), GraphError> {
    if a.numel() != out.numel() {
        return Err(GraphError::InternalError(format!(
            "softmax: operand holds {} elements but the output holds {}",
            a.numel(),
            out.numel()
        )));
    }
    let maximum = a.data.iter().copied().fold(T::neg_infinity(), T::max);
    for (o, &x) in out.data.iter_mut().zip(a.data.iter()) {
        *o = (x - maximum).exp();
    }
    let sum: T = out.data.iter().copied().sum();
    out.data.iter_mut().for_each(|o| *o /= sum);
    Ok(())
}

// --- Backward Operation ---

/// Vector-Jacobian product of the softmax, using its forward `output`.
///
/// The Jacobian is `J_ij = s_i (δ_ij − s_j)`, so
/// \\[ \frac{\partial L}{\partial a_i} = \sum_j g_j J_{ji} = s_i \Big(g_i - \sum_j g_j s_j\Big) \\]
/// which is evaluated in linear time.
pub(crate) fn softmax_backward<T: Scalar>(
    output: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<Tensor<T>, GraphError> {
    if output.numel() != grad_output.numel() {
        return Err(GraphError::InternalError(format!(
            "softmax backward: upstream gradient holds {} elements, expected {}",
            grad_output.numel(),
            output.numel()
        )));
    }
    let dot: T = output
        .data
        .iter()
        .zip(grad_output.data.iter())
        .map(|(&s, &g)| s * g)
        .sum();
    let data = output
        .data
        .iter()
        .zip(grad_output.data.iter())
        .map(|(&s, &g)| s * (g - dot))
        .collect();
    Tensor::new(data, output.shape)
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
