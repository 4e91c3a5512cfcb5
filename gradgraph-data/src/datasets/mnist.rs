// gradgraph-data/src/datasets/mnist.rs

use super::{one_hot, pixels_to_tensor};
use crate::dataset::Dataset;
use crate::error::DataError;
use gradgraph_core::{Scalar, Tensor};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::marker::PhantomData;
use std::path::Path;

pub const IMAGES_MAGIC: u32 = 0x0000_0803;
pub const LABELS_MAGIC: u32 = 0x0000_0801;

/// Raw MNIST images as read from an IDX file: `count` images of `rows x cols`
/// bytes, stored back to back.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IdxImages {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

impl IdxImages {
    fn image(&self, index: usize) -> &[u8] {
        let size = self.rows * self.cols;
        &self.pixels[index * size..(index + 1) * size]
    }
}

fn read_u32_be<R: Read>(reader: &mut R, what: &'static str, field: &str) -> Result<u32, DataError> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf, what, field)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_exact<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
    field: &str,
) -> Result<(), DataError> {
    let expected = buf.len();
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => DataError::Truncated {
            what,
            detail: format!("missing {} ({} bytes expected)", field, expected),
        },
        _ => DataError::Io(e),
    })
}

/// Reads exactly `len` payload bytes without trusting `len` for allocation.
fn read_payload<R: Read>(
    reader: &mut R,
    len: usize,
    what: &'static str,
    field: &str,
) -> Result<Vec<u8>, DataError> {
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(DataError::Truncated {
            what,
            detail: format!("{} has {} of {} bytes", field, buf.len(), len),
        });
    }
    Ok(buf)
}

fn check_magic<R: Read>(reader: &mut R, what: &'static str, expected: u32) -> Result<(), DataError> {
    let found = read_u32_be(reader, what, "magic number")?;
    if found != expected {
        return Err(DataError::InvalidMagic {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn parse_images<R: Read>(mut reader: R) -> Result<IdxImages, DataError> {
    check_magic(&mut reader, "images", IMAGES_MAGIC)?;
    let count = read_u32_be(&mut reader, "images", "image count")? as usize;
    let rows = read_u32_be(&mut reader, "images", "row count")? as usize;
    let cols = read_u32_be(&mut reader, "images", "column count")? as usize;
    let len = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| DataError::InvalidHeader {
            what: "images",
            detail: format!("{} images of {}x{} overflow the address space", count, rows, cols),
        })?;
    let pixels = read_payload(&mut reader, len, "images", "pixel data")?;
    debug!("Read {} MNIST images of {}x{}", count, rows, cols);
    Ok(IdxImages {
        count,
        rows,
        cols,
        pixels,
    })
}

pub(crate) fn parse_labels<R: Read>(mut reader: R) -> Result<Vec<u8>, DataError> {
    check_magic(&mut reader, "labels", LABELS_MAGIC)?;
    let count = read_u32_be(&mut reader, "labels", "label count")? as usize;
    let labels = read_payload(&mut reader, count, "labels", "label data")?;
    debug!("Read {} MNIST labels", count);
    Ok(labels)
}

fn open(path: &Path) -> Result<BufReader<File>, DataError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Reads an MNIST image file into flat tensors of `rows * cols` pixels in `[0, 1]`.
pub fn read_mnist_images<T: Scalar>(path: impl AsRef<Path>) -> Result<Vec<Tensor<T>>, DataError> {
    let images = parse_images(open(path.as_ref())?)?;
    (0..images.count)
        .map(|i| pixels_to_tensor(images.image(i)))
        .collect()
}

/// Reads an MNIST label file into one-hot tensors of shape `[10]`.
pub fn read_mnist_labels<T: Scalar>(path: impl AsRef<Path>) -> Result<Vec<Tensor<T>>, DataError> {
    parse_labels(open(path.as_ref())?)?
        .into_iter()
        .map(one_hot)
        .collect()
}

/// MNIST digits held in memory as raw bytes; tensors are built on access.
///
/// Items are `(image, target)` where `image` has shape `[rows * cols]` and
/// `target` is one-hot of shape `[10]`.
#[derive(Debug, Clone)]
pub struct MnistDataset<T> {
    images: IdxImages,
    labels: Vec<u8>,
    _marker: PhantomData<T>,
}

impl<T: Scalar> MnistDataset<T> {
    /// Opens an IDX image file and its matching label file.
    ///
    /// # Errors
    /// I/O, magic-number, header and truncation errors from either file, and
    /// `DataError::CountMismatch` if the counts disagree.
    pub fn open(images: impl AsRef<Path>, labels: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_readers(open(images.as_ref())?, open(labels.as_ref())?)
    }

    /// Reads both IDX streams from arbitrary readers.
    pub fn from_readers<I: Read, L: Read>(images: I, labels: L) -> Result<Self, DataError> {
        let images = parse_images(images)?;
        let labels = parse_labels(labels)?;
        if images.count != labels.len() {
            return Err(DataError::CountMismatch {
                images: images.count,
                labels: labels.len(),
            });
        }
        if images.count == 0 {
            warn!("MNIST dataset is empty");
        }
        Ok(MnistDataset {
            images,
            labels,
            _marker: PhantomData,
        })
    }

    /// `(rows, cols)` of every image.
    pub fn image_dims(&self) -> (usize, usize) {
        (self.images.rows, self.images.cols)
    }
}

impl<T: Scalar> Dataset for MnistDataset<T> {
    type Item = (Tensor<T>, Tensor<T>);

    fn get(&self, index: usize) -> Result<Self::Item, DataError> {
        if index >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let image = pixels_to_tensor(self.images.image(index))?;
        let target = one_hot(self.labels[index])?;
        Ok((image, target))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
