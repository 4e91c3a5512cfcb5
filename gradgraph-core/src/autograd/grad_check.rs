use crate::error::GraphError;
use crate::graph::{Graph, NodeId, Op};
use crate::tensor::Tensor;
use crate::types::Scalar;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for node {node}, element {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        node: NodeId,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for node {node}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        node: NodeId,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for node {node}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        node: NodeId,
        element_index: usize,
        value: f64,
    },
    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] GraphError),
}

/// Step size and tolerances for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation applied on each side of an element.
    pub epsilon: f64,
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    /// Only check parameter nodes, skipping placeholders.
    pub only_parameters: bool,
}

impl Default for GradCheckConfig {
    /// Tuned for `f64` graphs.
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-5,
            abs_tolerance: 1e-7,
            rel_tolerance: 1e-5,
            only_parameters: false,
        }
    }
}

impl GradCheckConfig {
    /// Looser settings suitable for `f32` graphs.
    pub fn for_f32() -> Self {
        GradCheckConfig {
            epsilon: 1e-2,
            abs_tolerance: 1e-3,
            rel_tolerance: 1e-2,
            only_parameters: false,
        }
    }
}

/// Checks the analytical adjoints of `graph` against central finite differences.
///
/// The loss is the sum of the last node's elements, so the analytical side
/// is seeded with ones. For every leaf element `x`, the graph is evaluated at
/// `x + ε` and `x − ε` and `(L+ − L−) / 2ε` is compared to the adjoint. An
/// element fails only if both the absolute and the relative difference
/// exceed their tolerance.
///
/// Leaf values are restored afterwards and a final forward pass leaves every
/// node as it was computed from the original inputs.
pub fn check_grad<T: Scalar>(
    graph: &mut Graph<T>,
    config: &GradCheckConfig,
) -> Result<(), GradCheckError> {
    let output = graph.output().ok_or(GraphError::EmptyGraph)?;

    graph.forward()?;
    let seed = Tensor::ones(graph.value(output)?.shape());
    let adjoints = graph.differentiate_with_seed(&seed)?;

    let leaves: Vec<NodeId> = graph
        .leaves()
        .filter(|&id| {
            !config.only_parameters || matches!(graph.nodes()[id.0].op(), Op::Parameter)
        })
        .collect();
    debug!("Gradient check over {} leaf node(s)", leaves.len());

    let epsilon = T::from_f64(config.epsilon);
    let two_eps = T::from_f64(2.0 * config.epsilon);
    let result = check_leaves(graph, &leaves, &adjoints, epsilon, two_eps, config, output);
    graph.forward()?;
    result
}

fn check_leaves<T: Scalar>(
    graph: &mut Graph<T>,
    leaves: &[NodeId],
    adjoints: &crate::autograd::Adjoints<T>,
    epsilon: T,
    two_eps: T,
    config: &GradCheckConfig,
    output: NodeId,
) -> Result<(), GradCheckError> {
    for &leaf in leaves {
        let original = graph.value(leaf)?.data().to_vec();
        let analytical = adjoints.wrt(leaf)?.data();
        let result = check_leaf(
            graph, leaf, &original, analytical, epsilon, two_eps, config, output,
        );
        // Restore on every exit, including graph errors mid-perturbation.
        graph.feed(leaf, &original)?;
        result?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn check_leaf<T: Scalar>(
    graph: &mut Graph<T>,
    leaf: NodeId,
    original: &[T],
    analytical: &[T],
    epsilon: T,
    two_eps: T,
    config: &GradCheckConfig,
    output: NodeId,
) -> Result<(), GradCheckError> {
    let mut perturbed = original.to_vec();

    for elem_idx in 0..original.len() {
        perturbed[elem_idx] = original[elem_idx] + epsilon;
        let loss_plus = loss_at(graph, leaf, &perturbed, output)?;
        perturbed[elem_idx] = original[elem_idx] - epsilon;
        let loss_minus = loss_at(graph, leaf, &perturbed, output)?;
        perturbed[elem_idx] = original[elem_idx];

        let numerical_grad = to_f64((loss_plus - loss_minus) / two_eps);
        let analytical_grad = to_f64(analytical[elem_idx]);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                node: leaf,
                element_index: elem_idx,
                loss_plus: to_f64(loss_plus),
                loss_minus: to_f64(loss_minus),
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                node: leaf,
                element_index: elem_idx,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        let scale = analytical_grad.abs().max(numerical_grad.abs());
        let abs_fail = difference > config.abs_tolerance;
        let rel_fail = scale > 0.0 && difference / scale > config.rel_tolerance;
        if abs_fail && rel_fail {
            return Err(GradCheckError::GradientMismatch {
                node: leaf,
                element_index: elem_idx,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }
    Ok(())
}

/// Feeds `data` into `leaf`, evaluates, and sums the output.
fn loss_at<T: Scalar>(
    graph: &mut Graph<T>,
    leaf: NodeId,
    data: &[T],
    output: NodeId,
) -> Result<T, GraphError> {
    graph.feed(leaf, data)?;
    graph.forward()?;
    Ok(graph.value(output)?.sum())
}

fn to_f64<T: Scalar>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
