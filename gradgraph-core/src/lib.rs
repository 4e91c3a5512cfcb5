//! # gradgraph-core
//!
//! A small computation-graph engine: build a DAG of tensor operations (by
//! API or from a script), evaluate it forward, and compute the gradient of
//! its output with respect to every node by reverse-mode differentiation.
//!
//! ```
//! use gradgraph_core::{Graph, Shape};
//!
//! let mut g = Graph::<f64>::new();
//! let x = g.placeholder(Shape::new(&[1, 2])?)?;
//! let w = g.parameter(Shape::new(&[2, 1])?)?;
//! let y = g.matmul(x, w)?;
//! g.feed(x, &[1.0, 2.0])?;
//! g.feed(w, &[3.0, 4.0])?;
//!
//! g.forward()?;
//! assert_eq!(g.value(y)?.data(), &[11.0]);
//!
//! let adjoints = g.differentiate()?;
//! assert_eq!(adjoints.wrt(w)?.data(), &[1.0, 2.0]);
//! # Ok::<(), gradgraph_core::GraphError>(())
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod ops;
pub mod script;
pub mod shape;
pub mod tensor;
pub mod types;
pub mod utils;

pub use autograd::{check_grad, differentiate, Adjoints, GradCheckConfig, GradCheckError};
pub use error::GraphError;
pub use graph::{forward, Graph, Node, NodeId, Op};
pub use script::{compile, compile_str};
pub use shape::Shape;
pub use tensor::Tensor;
pub use types::Scalar;
// Re-export traits required by public functions/structs
pub use num_traits;
