//! # Reverse-Mode Differentiation
//!
//! [`Graph::differentiate`](crate::Graph::differentiate) walks the arena from
//! the last node back to the first, pushing each node's adjoint into its
//! operands through the local gradient rules in [`crate::ops`]. The result is
//! an [`Adjoints`] table with one tensor per node.
//!
//! [`check_grad`] validates those adjoints against central finite
//! differences.

pub mod backward;
pub mod grad_check;

pub use backward::{differentiate, Adjoints};
pub use grad_check::{check_grad, GradCheckConfig, GradCheckError};
