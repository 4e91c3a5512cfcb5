// gradgraph-core/src/ops/linalg/matmul.rs

use crate::error::GraphError;
use crate::tensor::Tensor;
use crate::types::Scalar;

/// Reads the `(rows, cols)` of a tensor that construction proved to be a matrix.
fn matrix_dims<T: Scalar>(t: &Tensor<T>, role: &str) -> Result<(usize, usize), GraphError> {
    t.shape.as_matrix().ok_or_else(|| {
        GraphError::InternalError(format!(
            "matmul: {} operand has shape {}, expected a matrix",
            role, t.shape
        ))
    })
}

// --- Forward Operation ---

/// Dense matrix product `out = a · b`.
///
/// A: `[n, m]`, B: `[m, l]` -> out: `[n, l]`.
///
/// The output is zeroed first and then accumulated row by row, walking `b`
/// along contiguous rows (`i, j, k` loop order) for cache locality:
/// `out[i, k] += a[i, j] * b[j, k]`.
///
/// # Errors
/// Returns `GraphError::InternalError` if the operand or output shapes are
/// inconsistent, which construction-time validation rules out.
pub(crate) fn matmul_forward<T: Scalar>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    out: &mut Tensor<T>,
) -> Result<(), GraphError> {
    let (n, m) = matrix_dims(a, "left")?;
    let (m_b, l) = matrix_dims(b, "right")?;
    if m != m_b || out.shape.as_matrix() != Some((n, l)) {
        return Err(GraphError::InternalError(format!(
            "matmul: inconsistent shapes {} x {} -> {}",
            a.shape, b.shape, out.shape
        )));
    }

    out.data.iter_mut().for_each(|v| *v = T::zero());
    for i in 0..n {
        let out_row = &mut out.data[i * l..(i + 1) * l];
        for j in 0..m {
            let t = a.data[i * m + j];
            let b_row = &b.data[j * l..(j + 1) * l];
            for (o, &bv) in out_row.iter_mut().zip(b_row.iter()) {
                *o += t * bv;
            }
        }
    }
    Ok(())
}

// --- Backward Operation ---

/// Local gradients of `out = a · b` given `grad_output = ∂L/∂out`.
///
/// Returns `(∂L/∂a, ∂L/∂b)`:
/// - `∂a = grad_output · bᵗ`, contracted over the shared `l` dimension,
/// - `∂b = aᵗ · grad_output`, contracted over the `n` rows.
///
/// Both contributions are fresh tensors so that `matmul(x, x)` can accumulate
/// them one after the other into the same adjoint.
pub(crate) fn matmul_backward<T: Scalar>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    grad_output: &Tensor<T>,
) -> Result<(Tensor<T>, Tensor<T>), GraphError> {
    let (n, m) = matrix_dims(a, "left")?;
    let (_, l) = matrix_dims(b, "right")?;
    if grad_output.shape.as_matrix() != Some((n, l)) {
        return Err(GraphError::InternalError(format!(
            "matmul backward: upstream gradient has shape {}, expected [{}, {}]",
            grad_output.shape, n, l
        )));
    }

    let mut grad_a = Tensor::zeros(a.shape);
    let mut grad_b = Tensor::zeros(b.shape);
    for i in 0..n {
        let g_row = &grad_output.data[i * l..(i + 1) * l];
        for j in 0..m {
            let t = a.data[i * m + j];
            let b_row = &b.data[j * l..(j + 1) * l];
            let gb_row = &mut grad_b.data[j * l..(j + 1) * l];
            let mut acc = T::zero();
            for k in 0..l {
                acc += g_row[k] * b_row[k];
                gb_row[k] += t * g_row[k];
            }
            grad_a.data[i * m + j] += acc;
        }
    }
    Ok((grad_a, grad_b))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
