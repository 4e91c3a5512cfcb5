// gradgraph-core/src/graph/node.rs

use crate::tensor::Tensor;
use std::fmt;

/// Position of a node in its graph's node sequence.
///
/// Ids are handed out by the [`Graph`](super::Graph) constructors and only
/// ever refer backwards: a node's operands always have smaller ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// The operator computed by a node, with its operator-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Op<T> {
    /// Graph input, fed by the caller before each forward pass.
    Placeholder,
    /// Learnable value; behaves as a leaf for forward and backward.
    Parameter,
    /// `[n, m] x [m, l] -> [n, l]`
    MatMul { a: NodeId, b: NodeId },
    /// Elementwise sum of two same-shaped operands.
    Add { a: NodeId, b: NodeId },
    /// Elementwise natural logarithm.
    Log { a: NodeId },
    /// Same elements, new shape.
    Reshape { a: NodeId },
    Relu { a: NodeId },
    Gelu { a: NodeId },
    /// Softmax over the whole flat buffer.
    Softmax { a: NodeId },
    /// Multiplication by a constant.
    Mul { a: NodeId, factor: T },
}

impl<T> Op<T> {
    /// Operand ids, in operator order.
    pub fn inputs(&self) -> Vec<NodeId> {
        match *self {
            Op::Placeholder | Op::Parameter => vec![],
            Op::MatMul { a, b } | Op::Add { a, b } => vec![a, b],
            Op::Log { a }
            | Op::Reshape { a }
            | Op::Relu { a }
            | Op::Gelu { a }
            | Op::Softmax { a }
            | Op::Mul { a, .. } => vec![a],
        }
    }

    /// Leaves hold externally supplied values and are skipped by both passes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Placeholder | Op::Parameter)
    }

    /// The operator keyword, as written in graph scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Placeholder => "placeholder",
            Op::Parameter => "parameter",
            Op::MatMul { .. } => "matmul",
            Op::Add { .. } => "add",
            Op::Log { .. } => "log",
            Op::Reshape { .. } => "reshape",
            Op::Relu { .. } => "relu",
            Op::Gelu { .. } => "gelu",
            Op::Softmax { .. } => "softmax",
            Op::Mul { .. } => "mul",
        }
    }
}

/// A graph node: an operator instance and its materialized output.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub(crate) op: Op<T>,
    pub(crate) value: Tensor<T>,
}

impl<T> Node<T> {
    pub fn op(&self) -> &Op<T> {
        &self.op
    }

    /// The output tensor. Zero until forward evaluation (or feeding) fills it.
    pub fn value(&self) -> &Tensor<T> {
        &self.value
    }
}
