// src/tensor/mod.rs

use crate::error::GraphError;
use crate::shape::Shape;
use crate::types::Scalar;

pub mod create;

/// A dense, contiguous tensor: a flat row-major buffer paired with a [`Shape`].
///
/// Invariant: `data.len() == shape.numel()`. Node outputs are allocated once
/// at construction time and then mutated in place; a tensor is never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub(crate) data: Vec<T>,
    pub(crate) shape: Shape,
}

impl<T: Scalar> Tensor<T> {
    /// Creates a tensor from row-major data.
    ///
    /// # Errors
    /// Returns `GraphError::TensorCreationError` if the length of `data` does
    /// not match the number of elements of `shape`.
    pub fn new(data: Vec<T>, shape: Shape) -> Result<Self, GraphError> {
        if data.len() != shape.numel() {
            return Err(GraphError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a tensor from row-major data and a dimension slice.
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self, GraphError> {
        Tensor::new(data, Shape::new(dims)?)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().copied().sum()
    }

    /// Overwrites the buffer with `src`, keeping the shape.
    ///
    /// # Errors
    /// Returns `GraphError::TensorCreationError` if `src` has a different
    /// number of elements.
    pub fn copy_from_slice(&mut self, src: &[T]) -> Result<(), GraphError> {
        if src.len() != self.data.len() {
            return Err(GraphError::TensorCreationError {
                data_len: src.len(),
                shape: self.shape,
            });
        }
        self.data.copy_from_slice(src);
        Ok(())
    }

    /// Adds `other` into this tensor element by element.
    ///
    /// Used to accumulate adjoint contributions; shapes must match exactly.
    pub(crate) fn accumulate(&mut self, other: &Tensor<T>) -> Result<(), GraphError> {
        if self.shape != other.shape {
            return Err(GraphError::GradientAccumulationShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            });
        }
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(acc, &g)| *acc += g);
        Ok(())
    }
}
