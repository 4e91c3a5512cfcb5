// src/tensor/create.rs

use crate::error::GraphError;
use crate::shape::Shape;
use crate::tensor::Tensor;
use crate::types::Scalar;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Normal, StandardNormal};

impl<T: Scalar> Tensor<T> {
    /// Creates a zero-filled tensor with the given shape.
    pub fn zeros(shape: Shape) -> Self {
        Tensor::full(shape, T::zero())
    }

    /// Creates a tensor filled with ones with the given shape.
    pub fn ones(shape: Shape) -> Self {
        Tensor::full(shape, T::one())
    }

    /// Creates a tensor filled with `value`.
    pub fn full(shape: Shape, value: T) -> Self {
        Tensor {
            data: vec![value; shape.numel()],
            shape,
        }
    }

    /// Creates a zero-filled tensor with the same shape as `other`.
    pub fn zeros_like(other: &Tensor<T>) -> Self {
        Tensor::zeros(other.shape)
    }

    /// Creates a tensor sampled from a normal distribution.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidDistribution` if `std` is negative or not finite.
    pub fn rand_normal<R: Rng + ?Sized>(
        shape: Shape,
        mean: T,
        std: T,
        rng: &mut R,
    ) -> Result<Self, GraphError>
    where
        StandardNormal: Distribution<T>,
    {
        let normal =
            Normal::new(mean, std).map_err(|e| GraphError::InvalidDistribution(e.to_string()))?;
        let data = (0..shape.numel()).map(|_| normal.sample(rng)).collect();
        Ok(Tensor { data, shape })
    }

    /// Creates a tensor sampled uniformly from `[low, high)`.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidDistribution` if `low >= high`, or if either
    /// bound or the width `high - low` is not finite.
    pub fn rand_uniform<R: Rng + ?Sized>(
        shape: Shape,
        low: T,
        high: T,
        rng: &mut R,
    ) -> Result<Self, GraphError>
    where
        T: SampleUniform,
    {
        if !(low < high) {
            return Err(GraphError::InvalidDistribution(format!(
                "uniform range [{}, {}) is empty",
                low, high
            )));
        }
        if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) {
            return Err(GraphError::InvalidDistribution(format!(
                "uniform range [{}, {}) is not finite",
                low, high
            )));
        }
        let uniform = Uniform::new(low, high);
        let data = (0..shape.numel()).map(|_| uniform.sample(rng)).collect();
        Ok(Tensor { data, shape })
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
