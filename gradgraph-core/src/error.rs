use crate::shape::Shape;
use thiserror::Error;

/// Custom error type for the gradgraph engine.
///
/// Construction-time validation failures (shape and arity preconditions,
/// malformed scripts) are reported as dedicated variants. `InternalError` is
/// reserved for defects: a graph reaching a pass in a state that construction
/// should have made impossible.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GraphError {
    #[error("Invalid shape {dims:?}: {reason}")]
    InvalidShape { dims: Vec<usize>, reason: String },

    #[error("{operation}: operand {operand} is not a matrix (shape {shape})")]
    NotAMatrix {
        operation: String,
        operand: usize,
        shape: Shape,
    },

    #[error("Shape mismatch during operation {operation}: {lhs} vs {rhs}")]
    ShapeMismatch {
        operation: String,
        lhs: Shape,
        rhs: Shape,
    },

    #[error("Reshape: cannot view {numel} elements of {from} as {to}")]
    ReshapeSizeMismatch { from: Shape, to: Shape, numel: usize },

    #[error("Operand node {index} does not exist (graph has {len} nodes)")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape}")]
    TensorCreationError { data_len: usize, shape: Shape },

    #[error("Cannot feed {actual} values into node {index} holding {expected} elements")]
    FeedSizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Node {index} ({op}) is computed by the graph and cannot be fed")]
    NotALeaf { index: usize, op: &'static str },

    #[error("Cannot differentiate an empty graph")]
    EmptyGraph,

    #[error("Shape mismatch during gradient accumulation: expected {expected}, got {actual}")]
    GradientAccumulationShapeMismatch { expected: Shape, actual: Shape },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown keyword: {0}")]
    UnknownKeyword(String),

    #[error("Unknown node type: {0}")]
    UnknownOperator(String),

    #[error("Parse error at token {token:?}: {message}")]
    Parse { token: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Io(err.to_string())
    }
}
