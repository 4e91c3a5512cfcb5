//! # gradgraph-data
//!
//! Datasets that produce tensors ready to be fed into graph placeholders.
//!
//! - [`VecDataset`]: in-memory items.
//! - [`MnistDataset`]: MNIST images and labels in IDX format.
//! - [`Cifar10Dataset`]: CIFAR-10 binary batches.
//!
//! Image tensors are flat (`[rows * cols]` or `[3072]`) with pixels scaled
//! to `[0, 1]`; labels are one-hot tensors of shape `[10]`. Feeding a flat
//! tensor into a placeholder of any shape with the same element count works,
//! since [`Graph::feed`](gradgraph_core::Graph::feed) only checks the length.

pub mod dataset;
pub mod datasets;
pub mod error;

pub use dataset::Dataset;
pub use datasets::cifar10::{read_cifar10, Cifar10Dataset};
pub use datasets::mnist::{read_mnist_images, read_mnist_labels, MnistDataset};
pub use datasets::vec_dataset::VecDataset;
pub use error::DataError;
