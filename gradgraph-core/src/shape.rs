// gradgraph-core/src/shape.rs

use crate::error::GraphError;
use std::fmt;

/// Maximum rank supported by a [`Shape`].
pub const MAX_RANK: usize = 4;

/// A tensor shape of at most [`MAX_RANK`] dimensions.
///
/// Dimensions are stored in fixed slots; the first zero slot marks the end of
/// the rank and every slot after it is zero too. All present dimensions are
/// positive. Two shapes are equal iff all slots are equal, which is exactly
/// the check elementwise operations need.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape([usize; MAX_RANK]);

impl Shape {
    /// Creates a shape from its present dimensions.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidShape` if more than [`MAX_RANK`] dimensions
    /// are given or any of them is zero.
    pub fn new(dims: &[usize]) -> Result<Self, GraphError> {
        if dims.len() > MAX_RANK {
            return Err(GraphError::InvalidShape {
                dims: dims.to_vec(),
                reason: format!("rank {} exceeds the maximum of {}", dims.len(), MAX_RANK),
            });
        }
        if dims.iter().any(|&d| d == 0) {
            return Err(GraphError::InvalidShape {
                dims: dims.to_vec(),
                reason: "dimensions must be positive".to_string(),
            });
        }
        let mut slots = [0; MAX_RANK];
        slots[..dims.len()].copy_from_slice(dims);
        Ok(Shape(slots))
    }

    /// Creates a shape from zero-terminated slots.
    ///
    /// Reading stops at the first zero slot; anything after it is ignored.
    pub fn from_slots(slots: [usize; MAX_RANK]) -> Self {
        let mut clean = [0; MAX_RANK];
        for (dst, &src) in clean.iter_mut().zip(slots.iter()) {
            if src == 0 {
                break;
            }
            *dst = src;
        }
        Shape(clean)
    }

    /// The rank-0 shape, holding a single element.
    pub fn scalar() -> Self {
        Shape([0; MAX_RANK])
    }

    /// Number of present dimensions.
    pub fn rank(&self) -> usize {
        self.0.iter().take_while(|&&d| d != 0).count()
    }

    /// Present dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0[..self.rank()]
    }

    /// Dimension at `axis`, or `None` past the rank.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims().get(axis).copied()
    }

    /// Raw slots, including the zero terminators.
    pub fn slots(&self) -> [usize; MAX_RANK] {
        self.0
    }

    /// Total number of elements (the empty product is 1).
    pub fn numel(&self) -> usize {
        self.dims().iter().product()
    }

    /// `(rows, cols)` for rank-2 shapes.
    pub fn as_matrix(&self) -> Option<(usize, usize)> {
        match self.dims() {
            &[rows, cols] => Some((rows, cols)),
            _ => None,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.dims())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.dims())
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = GraphError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        Shape::new(dims)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for Shape {
    type Error = GraphError;

    fn try_from(dims: [usize; N]) -> Result<Self, Self::Error> {
        Shape::new(&dims)
    }
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
