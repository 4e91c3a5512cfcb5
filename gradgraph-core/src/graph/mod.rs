//! # Computation Graph
//!
//! A [`Graph`] is an append-only arena of [`Node`]s plus a symbol table from
//! names to [`NodeId`]s. Nodes are created through one constructor per
//! operator; each constructor validates its operands, allocates the output
//! tensor once, and appends exactly one node.
//!
//! Because a node can only reference ids that already exist, creation order
//! is a topological order. The forward evaluator walks the arena front to
//! back and the differentiator walks it back to front; neither needs to sort.

use crate::error::GraphError;
use crate::shape::Shape;
use crate::tensor::Tensor;
use crate::types::Scalar;
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::collections::HashMap;

pub mod forward;
pub mod node;

pub use forward::forward;
pub use node::{Node, NodeId, Op};

/// A directed acyclic graph of tensor operations over scalar type `T`.
#[derive(Debug, Clone, Default)]
pub struct Graph<T> {
    nodes: Vec<Node<T>>,
    symbols: HashMap<String, NodeId>,
}

impl<T: Scalar> Graph<T> {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            symbols: HashMap::new(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// # Errors
    /// `GraphError::NodeOutOfRange` if `id` does not belong to this graph.
    pub fn node(&self, id: NodeId) -> Result<&Node<T>, GraphError> {
        self.nodes.get(id.0).ok_or(GraphError::NodeOutOfRange {
            index: id.0,
            len: self.nodes.len(),
        })
    }

    /// The current output tensor of `id`.
    pub fn value(&self, id: NodeId) -> Result<&Tensor<T>, GraphError> {
        self.node(id).map(Node::value)
    }

    /// Ids of the placeholder and parameter nodes, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.op.is_leaf())
            .map(|(i, _)| NodeId(i))
    }

    /// Id of the most recently created node, which differentiation treats as
    /// the output.
    pub fn output(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1).map(NodeId)
    }

    // --- Symbol table ---

    /// Binds `name` to `id`. Rebinding an existing name replaces the old entry.
    pub fn define(&mut self, name: impl Into<String>, id: NodeId) -> Result<(), GraphError> {
        self.check_operand(id)?;
        let name = name.into();
        if let Some(previous) = self.symbols.insert(name.clone(), id) {
            debug!("Rebound symbol '{}' from {} to {}", name, previous, id);
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.symbols.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), but an unknown name is an error.
    pub fn resolve(&self, name: &str) -> Result<NodeId, GraphError> {
        self.lookup(name)
            .ok_or_else(|| GraphError::UnknownSymbol(name.to_string()))
    }

    // --- Leaf data ---

    /// Copies `data` into the leaf node `id`.
    ///
    /// # Errors
    /// - `GraphError::NotALeaf` if `id` is computed by an operator.
    /// - `GraphError::FeedSizeMismatch` if `data.len()` differs from the
    ///   node's element count.
    pub fn feed(&mut self, id: NodeId, data: &[T]) -> Result<(), GraphError> {
        self.check_operand(id)?;
        let node = &mut self.nodes[id.0];
        if !node.op.is_leaf() {
            return Err(GraphError::NotALeaf {
                index: id.0,
                op: node.op.name(),
            });
        }
        if node.value.numel() != data.len() {
            return Err(GraphError::FeedSizeMismatch {
                index: id.0,
                expected: node.value.numel(),
                actual: data.len(),
            });
        }
        node.value.data.copy_from_slice(data);
        Ok(())
    }

    /// Feeds the leaf bound to `name`.
    pub fn feed_named(&mut self, name: &str, data: &[T]) -> Result<(), GraphError> {
        let id = self.resolve(name)?;
        self.feed(id, data)
    }

    /// Fills every parameter node with samples from `Normal(0, std)`.
    pub fn randomize_parameters<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        std: T,
    ) -> Result<(), GraphError>
    where
        StandardNormal: Distribution<T>,
    {
        let normal = rand_distr::Normal::new(T::zero(), std)
            .map_err(|e| GraphError::InvalidDistribution(e.to_string()))?;
        let mut count = 0;
        for node in self.nodes.iter_mut().filter(|n| matches!(n.op, Op::Parameter)) {
            node.value
                .data
                .iter_mut()
                .for_each(|v| *v = normal.sample(rng));
            count += 1;
        }
        debug!("Randomized {} parameter node(s) with std {}", count, std);
        Ok(())
    }

    // --- Constructors ---

    /// Graph input of the given shape, fed before each forward pass.
    pub fn placeholder(&mut self, shape: Shape) -> Result<NodeId, GraphError> {
        Ok(self.push(Op::Placeholder, shape))
    }

    /// Learnable leaf of the given shape.
    pub fn parameter(&mut self, shape: Shape) -> Result<NodeId, GraphError> {
        Ok(self.push(Op::Parameter, shape))
    }

    /// Matrix product of `[n, m]` and `[m, l]`, giving `[n, l]`.
    ///
    /// # Errors
    /// - `GraphError::NotAMatrix` if either operand is not rank 2.
    /// - `GraphError::ShapeMismatch` if the inner dimensions differ.
    pub fn matmul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let a_shape = self.operand_shape(a)?;
        let b_shape = self.operand_shape(b)?;
        let not_a_matrix = |operand: usize, shape: Shape| GraphError::NotAMatrix {
            operation: "matmul".to_string(),
            operand,
            shape,
        };
        let (n, m) = a_shape.as_matrix().ok_or_else(|| not_a_matrix(0, a_shape))?;
        let (m_b, l) = b_shape.as_matrix().ok_or_else(|| not_a_matrix(1, b_shape))?;
        if m != m_b {
            return Err(GraphError::ShapeMismatch {
                operation: "matmul".to_string(),
                lhs: a_shape,
                rhs: b_shape,
            });
        }
        let shape = Shape::new(&[n, l])?;
        Ok(self.push(Op::MatMul { a, b }, shape))
    }

    /// Elementwise sum; both operands must have identical shapes.
    pub fn add(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let a_shape = self.operand_shape(a)?;
        let b_shape = self.operand_shape(b)?;
        if a_shape != b_shape {
            return Err(GraphError::ShapeMismatch {
                operation: "add".to_string(),
                lhs: a_shape,
                rhs: b_shape,
            });
        }
        Ok(self.push(Op::Add { a, b }, a_shape))
    }

    pub fn log(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let shape = self.operand_shape(a)?;
        Ok(self.push(Op::Log { a }, shape))
    }

    /// Same elements under a new shape.
    ///
    /// # Errors
    /// `GraphError::ReshapeSizeMismatch` if the element counts differ.
    pub fn reshape(&mut self, a: NodeId, shape: Shape) -> Result<NodeId, GraphError> {
        let from = self.operand_shape(a)?;
        if from.numel() != shape.numel() {
            return Err(GraphError::ReshapeSizeMismatch {
                from,
                to: shape,
                numel: from.numel(),
            });
        }
        Ok(self.push(Op::Reshape { a }, shape))
    }

    pub fn relu(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let shape = self.operand_shape(a)?;
        Ok(self.push(Op::Relu { a }, shape))
    }

    pub fn gelu(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let shape = self.operand_shape(a)?;
        Ok(self.push(Op::Gelu { a }, shape))
    }

    /// Softmax over all elements of `a`, regardless of its shape.
    pub fn softmax(&mut self, a: NodeId) -> Result<NodeId, GraphError> {
        let shape = self.operand_shape(a)?;
        Ok(self.push(Op::Softmax { a }, shape))
    }

    /// `a * factor`.
    pub fn mul(&mut self, a: NodeId, factor: T) -> Result<NodeId, GraphError> {
        let shape = self.operand_shape(a)?;
        Ok(self.push(Op::Mul { a, factor }, shape))
    }

    // --- Internals ---

    fn check_operand(&self, id: NodeId) -> Result<(), GraphError> {
        if id.0 >= self.nodes.len() {
            return Err(GraphError::NodeOutOfRange {
                index: id.0,
                len: self.nodes.len(),
            });
        }
        Ok(())
    }

    fn operand_shape(&self, id: NodeId) -> Result<Shape, GraphError> {
        self.check_operand(id)?;
        Ok(self.nodes[id.0].value.shape)
    }

    fn push(&mut self, op: Op<T>, shape: Shape) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!("Created {} {} with shape {}", op.name(), id, shape);
        self.nodes.push(Node {
            op,
            value: Tensor::zeros(shape),
        });
        id
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node<T>] {
        &mut self.nodes
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
