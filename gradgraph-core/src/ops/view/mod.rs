// gradgraph-core/src/ops/view/mod.rs

pub mod reshape;

pub(crate) use reshape::{reshape_backward, reshape_forward};
