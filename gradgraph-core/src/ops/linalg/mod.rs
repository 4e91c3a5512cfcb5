// src/ops/linalg/mod.rs

pub mod matmul;

pub(crate) use matmul::{matmul_backward, matmul_forward};
