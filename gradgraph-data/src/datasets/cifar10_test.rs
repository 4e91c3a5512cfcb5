use super::*;
use approx::assert_relative_eq;
use std::io::Cursor;

fn record(label: u8, fill: u8) -> Vec<u8> {
    let mut bytes = vec![label];
    bytes.extend(std::iter::repeat(fill).take(IMAGE_BYTES));
    bytes
}

#[test]
fn test_cifar10_from_reader() {
    let mut bytes = record(3, 255);
    let mut second = record(9, 0);
    second[1] = 51;
    bytes.extend(second);

    let dataset: Cifar10Dataset<f64> = Cifar10Dataset::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(dataset.len(), 2);

    let (image, target) = dataset.get(0).unwrap();
    assert_eq!(image.shape().dims(), &[3072]);
    assert!(image.data().iter().all(|&p| p == 1.0));
    assert_eq!(target.data()[3], 1.0);

    let (image, target) = dataset.get(1).unwrap();
    assert_relative_eq!(image.data()[0], 0.2);
    assert_relative_eq!(image.sum(), 0.2);
    assert_eq!(target.data()[9], 1.0);

    assert!(matches!(
        dataset.get(2),
        Err(DataError::IndexOutOfBounds { index: 2, len: 2 })
    ));
}

#[test]
fn test_cifar10_partial_record() {
    let mut bytes = record(1, 0);
    bytes.truncate(RECORD_BYTES - 1);
    assert!(matches!(
        Cifar10Dataset::<f32>::from_reader(Cursor::new(bytes)),
        Err(DataError::Truncated { .. })
    ));
}

#[test]
fn test_cifar10_bad_label() {
    let mut bytes = record(1, 0);
    bytes.extend(record(12, 0));
    assert!(matches!(
        Cifar10Dataset::<f32>::from_reader(Cursor::new(bytes)),
        Err(DataError::LabelOutOfRange { label: 12, .. })
    ));
}

#[test]
fn test_read_cifar10_file() {
    let path = std::env::temp_dir().join(format!("gradgraph-cifar-{}.bin", std::process::id()));
    let mut bytes = record(0, 128);
    bytes.extend(record(5, 64));
    std::fs::write(&path, bytes).unwrap();

    let (images, targets) = read_cifar10::<f32>(&path).unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[1].data()[5], 1.0);
    assert_relative_eq!(images[0].data()[100], 128.0 / 255.0);
    std::fs::remove_file(&path).unwrap();
}
