// gradgraph-core/src/autograd/backward.rs

use crate::error::GraphError;
use crate::graph::forward::earlier_value;
use crate::graph::{Graph, Node, NodeId, Op};
use crate::ops::activation::{gelu_backward, relu_backward, softmax_backward};
use crate::ops::arithmetic::{add_backward, mul_backward};
use crate::ops::linalg::matmul_backward;
use crate::ops::math_elem::ln_backward;
use crate::ops::view::reshape_backward;
use crate::tensor::Tensor;
use crate::types::Scalar;
use log::{debug, trace, warn};
use std::ops::Index;

/// Gradients of the output with respect to every node of a graph.
///
/// Entry `i` has the shape of node `i`'s output.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjoints<T> {
    grads: Vec<Tensor<T>>,
}

impl<T: Scalar> Adjoints<T> {
    /// Adjoint of node `id`.
    pub fn wrt(&self, id: NodeId) -> Result<&Tensor<T>, GraphError> {
        self.grads.get(id.0).ok_or(GraphError::NodeOutOfRange {
            index: id.0,
            len: self.grads.len(),
        })
    }

    /// Adjoint of the node bound to `name` in `graph`.
    pub fn by_name(&self, graph: &Graph<T>, name: &str) -> Result<&Tensor<T>, GraphError> {
        self.wrt(graph.resolve(name)?)
    }

    pub fn len(&self) -> usize {
        self.grads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tensor<T>> {
        self.grads.iter()
    }

    pub fn into_vec(self) -> Vec<Tensor<T>> {
        self.grads
    }
}

impl<T> Index<NodeId> for Adjoints<T> {
    type Output = Tensor<T>;

    fn index(&self, id: NodeId) -> &Tensor<T> {
        &self.grads[id.0]
    }
}

impl<T: Scalar> Graph<T> {
    /// Reverse-mode differentiation of the last node.
    ///
    /// The last node's adjoint is seeded with 1 at its first element and zero
    /// elsewhere; every other adjoint starts at zero. Run
    /// [`forward`](Graph::forward) first: the local gradients read the
    /// current node values.
    ///
    /// # Errors
    /// - `GraphError::EmptyGraph` if there is nothing to differentiate.
    /// - `GraphError::InternalError` if the graph violates the
    ///   operands-precede-consumers ordering.
    pub fn differentiate(&self) -> Result<Adjoints<T>, GraphError> {
        let last = self.nodes().last().ok_or(GraphError::EmptyGraph)?;
        let mut seed = Tensor::zeros_like(last.value());
        if seed.numel() > 1 {
            warn!(
                "Differentiating non-scalar output of shape {}; seeding its first element only",
                seed.shape()
            );
        }
        seed.data[0] = T::one();
        self.differentiate_with_seed(&seed)
    }

    /// Reverse-mode differentiation starting from an explicit adjoint for the
    /// last node.
    ///
    /// A seed of all ones differentiates the sum of the output's elements.
    ///
    /// # Errors
    /// `GraphError::GradientAccumulationShapeMismatch` if `seed` does not
    /// have the last node's shape, plus everything
    /// [`differentiate`](Graph::differentiate) reports.
    pub fn differentiate_with_seed(&self, seed: &Tensor<T>) -> Result<Adjoints<T>, GraphError> {
        let nodes = self.nodes();
        if nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let mut grads: Vec<Tensor<T>> = nodes.iter().map(|n| Tensor::zeros_like(&n.value)).collect();
        let last = nodes.len() - 1;
        grads[last].accumulate(seed)?;

        debug!("Backward pass over {} nodes", nodes.len());
        for i in (0..nodes.len()).rev() {
            let (earlier, rest) = nodes.split_at(i);
            let node = &rest[0];
            if node.op.is_leaf() {
                continue;
            }
            trace!("Differentiating %{} ({})", i, node.op.name());
            let contributions = local_gradients(earlier, node, i, &grads[i])?;
            for (input, contribution) in contributions {
                grads[input.0].accumulate(&contribution)?;
            }
        }
        debug!("Backward pass complete");
        Ok(Adjoints { grads })
    }
}

/// Contribution of node `i` to the adjoint of each of its operands.
///
/// Contributions are returned rather than applied so that an operand used
/// twice (`add(x, x)`) receives both.
fn local_gradients<T: Scalar>(
    earlier: &[Node<T>],
    node: &Node<T>,
    i: usize,
    grad: &Tensor<T>,
) -> Result<Vec<(NodeId, Tensor<T>)>, GraphError> {
    let contributions = match node.op {
        Op::Placeholder | Op::Parameter => vec![],
        Op::MatMul { a, b } => {
            let (ga, gb) = matmul_backward(
                earlier_value(earlier, a, i)?,
                earlier_value(earlier, b, i)?,
                grad,
            )?;
            vec![(a, ga), (b, gb)]
        }
        Op::Add { a, b } => {
            earlier_value(earlier, a, i)?;
            earlier_value(earlier, b, i)?;
            let (ga, gb) = add_backward(grad);
            vec![(a, ga), (b, gb)]
        }
        Op::Log { a } => vec![(a, ln_backward(earlier_value(earlier, a, i)?, grad)?)],
        Op::Reshape { a } => vec![(a, reshape_backward(earlier_value(earlier, a, i)?, grad)?)],
        Op::Relu { a } => vec![(a, relu_backward(earlier_value(earlier, a, i)?, grad)?)],
        Op::Gelu { a } => vec![(a, gelu_backward(earlier_value(earlier, a, i)?, grad)?)],
        Op::Softmax { a } => {
            earlier_value(earlier, a, i)?;
            vec![(a, softmax_backward(&node.value, grad)?)]
        }
        Op::Mul { a, factor } => {
            vec![(a, mul_backward(earlier_value(earlier, a, i)?, factor, grad)?)]
        }
    };
    Ok(contributions)
}

/// Free-function form of [`Graph::differentiate`].
pub fn differentiate<T: Scalar>(graph: &Graph<T>) -> Result<Adjoints<T>, GraphError> {
    graph.differentiate()
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
