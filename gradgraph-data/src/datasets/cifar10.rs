// gradgraph-data/src/datasets/cifar10.rs

use super::{one_hot, pixels_to_tensor};
use crate::dataset::Dataset;
use crate::error::DataError;
use gradgraph_core::{Scalar, Tensor};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

/// Bytes per image: 3 channels of 32x32, channel-major.
pub const IMAGE_BYTES: usize = 3 * 32 * 32;
/// One label byte followed by the image.
pub const RECORD_BYTES: usize = 1 + IMAGE_BYTES;

/// A CIFAR-10 binary batch (`data_batch_N.bin` / `test_batch.bin`) held in memory.
///
/// Items are `(image, target)` where `image` has shape `[3072]` with pixels
/// in `[0, 1]` and `target` is one-hot of shape `[10]`.
#[derive(Debug, Clone)]
pub struct Cifar10Dataset<T> {
    records: Vec<u8>,
    _marker: PhantomData<T>,
}

impl<T: Scalar> Cifar10Dataset<T> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_reader(BufReader::new(File::open(path.as_ref())?))
    }

    /// Reads a whole batch from `reader`.
    ///
    /// # Errors
    /// `DataError::Truncated` if the stream does not hold a whole number of
    /// records; `DataError::LabelOutOfRange` if any label byte exceeds 9.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DataError> {
        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;
        if records.len() % RECORD_BYTES != 0 {
            return Err(DataError::Truncated {
                what: "CIFAR-10",
                detail: format!(
                    "{} bytes is not a multiple of the {}-byte record size",
                    records.len(),
                    RECORD_BYTES
                ),
            });
        }
        if let Some(&label) = records
            .chunks_exact(RECORD_BYTES)
            .map(|r| &r[0])
            .find(|&&l| usize::from(l) >= super::NUM_CLASSES)
        {
            return Err(DataError::LabelOutOfRange {
                label,
                classes: super::NUM_CLASSES,
            });
        }
        let count = records.len() / RECORD_BYTES;
        if count == 0 {
            warn!("CIFAR-10 batch is empty");
        }
        debug!("Read {} CIFAR-10 records", count);
        Ok(Cifar10Dataset {
            records,
            _marker: PhantomData,
        })
    }

    fn record(&self, index: usize) -> &[u8] {
        &self.records[index * RECORD_BYTES..(index + 1) * RECORD_BYTES]
    }
}

impl<T: Scalar> Dataset for Cifar10Dataset<T> {
    type Item = (Tensor<T>, Tensor<T>);

    fn get(&self, index: usize) -> Result<Self::Item, DataError> {
        if index >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let record = self.record(index);
        Ok((pixels_to_tensor(&record[1..])?, one_hot(record[0])?))
    }

    fn len(&self) -> usize {
        self.records.len() / RECORD_BYTES
    }
}

/// Reads a CIFAR-10 batch file into `(images, targets)`.
pub fn read_cifar10<T: Scalar>(
    path: impl AsRef<Path>,
) -> Result<(Vec<Tensor<T>>, Vec<Tensor<T>>), DataError> {
    let dataset = Cifar10Dataset::<T>::open(path)?;
    let mut images = Vec::with_capacity(dataset.len());
    let mut targets = Vec::with_capacity(dataset.len());
    for i in 0..dataset.len() {
        let (image, target) = dataset.get(i)?;
        images.push(image);
        targets.push(target);
    }
    Ok((images, targets))
}

#[cfg(test)]
#[path = "cifar10_test.rs"]
mod tests;
