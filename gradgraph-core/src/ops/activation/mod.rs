// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Non-linear activations available as graph operators.
//!
//! ## Currently Implemented:
//! - [`relu`]: Rectified Linear Unit.
//! - [`gelu`]: exact Gaussian Error Linear Unit (erf form).
//! - [`softmax`]: numerically stabilized softmax over the whole buffer.

pub mod gelu;
pub mod relu;
pub mod softmax;

pub(crate) use gelu::{gelu_backward, gelu_forward};
pub(crate) use relu::{relu_backward, relu_forward};
pub(crate) use softmax::{softmax_backward, softmax_forward};
