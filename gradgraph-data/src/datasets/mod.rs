pub mod cifar10;
pub mod mnist;
pub mod vec_dataset;

use crate::error::DataError;
use gradgraph_core::{Scalar, Tensor};

/// Number of classes in both MNIST and CIFAR-10.
pub const NUM_CLASSES: usize = 10;

/// Flat tensor of `pixels` scaled from `0..=255` into `[0, 1]`.
pub(crate) fn pixels_to_tensor<T: Scalar>(pixels: &[u8]) -> Result<Tensor<T>, DataError> {
    let scale = T::from_f64(255.0);
    let data = pixels.iter().map(|&p| T::from_f64(f64::from(p)) / scale).collect();
    Ok(Tensor::from_vec(data, &[pixels.len()])?)
}

/// One-hot tensor of shape `[NUM_CLASSES]`.
pub(crate) fn one_hot<T: Scalar>(label: u8) -> Result<Tensor<T>, DataError> {
    let class = usize::from(label);
    if class >= NUM_CLASSES {
        return Err(DataError::LabelOutOfRange {
            label,
            classes: NUM_CLASSES,
        });
    }
    let mut data = vec![T::zero(); NUM_CLASSES];
    data[class] = T::one();
    Ok(Tensor::from_vec(data, &[NUM_CLASSES])?)
}
