// gradgraph-core/src/graph/forward.rs

use super::{Graph, Node, NodeId, Op};
use crate::error::GraphError;
use crate::ops::activation::{gelu_forward, relu_forward, softmax_forward};
use crate::ops::arithmetic::{add_forward, mul_forward};
use crate::ops::linalg::matmul_forward;
use crate::ops::math_elem::ln_forward;
use crate::ops::view::reshape_forward;
use crate::tensor::Tensor;
use crate::types::Scalar;
use log::{debug, trace};

/// Resolves operand `id` of node `consumer` among the nodes created before it.
///
/// Construction only hands out backward references, so an operand that is
/// not in `earlier` means the graph was corrupted.
pub(crate) fn earlier_value<T>(
    earlier: &[Node<T>],
    id: NodeId,
    consumer: usize,
) -> Result<&Tensor<T>, GraphError> {
    earlier.get(id.0).map(|n| &n.value).ok_or_else(|| {
        GraphError::InternalError(format!(
            "node %{} references {} which does not precede it",
            consumer, id
        ))
    })
}

impl<T: Scalar> Graph<T> {
    /// Evaluates every computed node once, in creation order.
    ///
    /// Leaves keep whatever was fed into them. Each output tensor is
    /// overwritten in place; nothing is allocated.
    pub fn forward(&mut self) -> Result<(), GraphError> {
        let nodes = self.nodes_mut();
        debug!("Forward pass over {} nodes", nodes.len());
        for i in 0..nodes.len() {
            let (earlier, rest) = nodes.split_at_mut(i);
            let node = &mut rest[0];
            if node.op.is_leaf() {
                continue;
            }
            trace!("Evaluating %{} ({})", i, node.op.name());
            let out = &mut node.value;
            match node.op {
                Op::Placeholder | Op::Parameter => {}
                Op::MatMul { a, b } => {
                    let a = earlier_value(earlier, a, i)?;
                    let b = earlier_value(earlier, b, i)?;
                    matmul_forward(a, b, out)?;
                }
                Op::Add { a, b } => {
                    let a = earlier_value(earlier, a, i)?;
                    let b = earlier_value(earlier, b, i)?;
                    add_forward(a, b, out)?;
                }
                Op::Log { a } => ln_forward(earlier_value(earlier, a, i)?, out)?,
                Op::Reshape { a } => reshape_forward(earlier_value(earlier, a, i)?, out)?,
                Op::Relu { a } => relu_forward(earlier_value(earlier, a, i)?, out)?,
                Op::Gelu { a } => gelu_forward(earlier_value(earlier, a, i)?, out)?,
                Op::Softmax { a } => softmax_forward(earlier_value(earlier, a, i)?, out)?,
                Op::Mul { a, factor } => {
                    mul_forward(earlier_value(earlier, a, i)?, factor, out)?
                }
            }
        }
        debug!("Forward pass complete");
        Ok(())
    }
}

/// Free-function form of [`Graph::forward`].
pub fn forward<T: Scalar>(graph: &mut Graph<T>) -> Result<(), GraphError> {
    graph.forward()
}

#[cfg(test)]
#[path = "forward_test.rs"]
mod tests;
