use super::*;
use approx::assert_relative_eq;
use std::io::Cursor;

fn idx_images(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for v in [IMAGES_MAGIC, count, rows, cols] {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    bytes.extend_from_slice(pixels);
    bytes
}

fn idx_labels(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

#[test]
fn test_mnist_from_readers() {
    let images = idx_images(2, 2, 2, &[0, 255, 51, 102, 255, 255, 0, 0]);
    let labels = idx_labels(&[7, 0]);
    let dataset: MnistDataset<f64> =
        MnistDataset::from_readers(Cursor::new(images), Cursor::new(labels)).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.image_dims(), (2, 2));

    let (image, target) = dataset.get(0).unwrap();
    assert_eq!(image.shape().dims(), &[4]);
    assert_relative_eq!(image.data()[1], 1.0);
    assert_relative_eq!(image.data()[2], 0.2);
    assert_eq!(target.shape().dims(), &[10]);
    assert_eq!(target.data()[7], 1.0);
    assert_relative_eq!(target.sum(), 1.0);

    let (image, target) = dataset.get(1).unwrap();
    assert_eq!(image.data(), &[1.0, 1.0, 0.0, 0.0]);
    assert_eq!(target.data()[0], 1.0);
}

#[test]
fn test_mnist_index_out_of_bounds() {
    let dataset: MnistDataset<f32> =
        MnistDataset::from_readers(Cursor::new(idx_images(1, 1, 1, &[9])), Cursor::new(idx_labels(&[1])))
            .unwrap();
    assert!(matches!(
        dataset.get(1),
        Err(DataError::IndexOutOfBounds { index: 1, len: 1 })
    ));
}

#[test]
fn test_mnist_invalid_magic() {
    let mut images = idx_images(1, 1, 1, &[0]);
    images[3] = 0x01;
    match parse_images(Cursor::new(images)) {
        Err(DataError::InvalidMagic { expected, found, .. }) => {
            assert_eq!(expected, IMAGES_MAGIC);
            assert_eq!(found, 0x0000_0801);
        }
        other => panic!("Expected InvalidMagic, got {:?}", other),
    }
    // An image file handed in as labels
    assert!(matches!(
        parse_labels(Cursor::new(idx_images(1, 1, 1, &[0]))),
        Err(DataError::InvalidMagic { what: "labels", .. })
    ));
}

#[test]
fn test_mnist_truncated() {
    let images = idx_images(3, 2, 2, &[0; 8]);
    assert!(matches!(
        parse_images(Cursor::new(images)),
        Err(DataError::Truncated { what: "images", .. })
    ));
    assert!(matches!(
        parse_labels(Cursor::new(vec![0, 0, 8])),
        Err(DataError::Truncated { .. })
    ));
}

#[test]
fn test_mnist_count_mismatch() {
    let result = MnistDataset::<f64>::from_readers(
        Cursor::new(idx_images(2, 1, 1, &[0, 0])),
        Cursor::new(idx_labels(&[1])),
    );
    assert!(matches!(
        result,
        Err(DataError::CountMismatch { images: 2, labels: 1 })
    ));
}

#[test]
fn test_mnist_files_on_disk() {
    let dir = std::env::temp_dir().join(format!("gradgraph-mnist-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let images_path = dir.join("images.idx3-ubyte");
    let labels_path = dir.join("labels.idx1-ubyte");
    std::fs::write(&images_path, idx_images(1, 1, 3, &[0, 255, 255])).unwrap();
    std::fs::write(&labels_path, idx_labels(&[4])).unwrap();

    let dataset = MnistDataset::<f32>::open(&images_path, &labels_path).unwrap();
    assert_eq!(dataset.len(), 1);

    let images: Vec<Tensor<f32>> = read_mnist_images(&images_path).unwrap();
    let labels: Vec<Tensor<f32>> = read_mnist_labels(&labels_path).unwrap();
    assert_eq!(images[0].data(), &[0.0, 1.0, 1.0]);
    assert_eq!(labels[0].data()[4], 1.0);

    assert!(matches!(
        read_mnist_images::<f32>(dir.join("missing")),
        Err(DataError::Io(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_mnist_header_size_overflow() {
    let bytes = idx_images(u32::MAX, u32::MAX, u32::MAX, &[]);
    assert!(matches!(
        parse_images(&bytes[..]),
        Err(DataError::InvalidHeader { what: "images", .. })
    ));
}

#[test]
fn test_mnist_huge_header_counts_are_truncated() {
    // Sizes far beyond the payload are reported, not allocated up front
    let images = idx_images(65536, 65536, 65536, &[1, 2, 3]);
    match parse_images(&images[..]) {
        Err(DataError::Truncated { what, detail }) => {
            assert_eq!(what, "images");
            assert!(detail.contains("3 of"), "unexpected detail: {}", detail);
        }
        other => panic!("Expected Truncated, got {:?}", other),
    }

    let mut labels = idx_labels(&[1, 2]);
    labels[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
    assert!(matches!(
        parse_labels(&labels[..]),
        Err(DataError::Truncated { what: "labels", .. })
    ));
}
