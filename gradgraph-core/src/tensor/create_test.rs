// src/tensor/create_test.rs

use crate::error::GraphError;
use crate::shape::Shape;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_and_ones() {
    let shape = Shape::new(&[2, 3]).unwrap();
    let z = Tensor::<f32>::zeros(shape);
    assert_eq!(z.numel(), 6);
    assert!(z.data().iter().all(|&x| x == 0.0), "Tensor not filled with zeros");

    let o = Tensor::<f64>::ones(shape);
    assert!(o.data().iter().all(|&x| x == 1.0));
    assert_eq!(Tensor::zeros_like(&o).shape(), shape);
}

#[test]
fn test_fresh_tensor_length_matches_shape() {
    for dims in [vec![1], vec![3, 4], vec![2, 1, 5], vec![2, 3, 2, 2]] {
        let shape = Shape::new(&dims).unwrap();
        assert_eq!(Tensor::<f32>::zeros(shape).data().len(), shape.numel());
    }
}

#[test]
fn test_full() {
    let t = Tensor::full(Shape::new(&[4]).unwrap(), 2.5_f32);
    assert_eq!(t.data(), &[2.5, 2.5, 2.5, 2.5]);
}

#[test]
fn test_rand_normal_is_reproducible() {
    let shape = Shape::new(&[8, 8]).unwrap();
    let a = Tensor::<f64>::rand_normal(shape, 0.0, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = Tensor::<f64>::rand_normal(shape, 0.0, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.numel(), 64);
    assert!(a.data().iter().any(|&x| x != 0.0));
}

#[test]
fn test_rand_normal_rejects_negative_std() {
    let shape = Shape::new(&[2]).unwrap();
    let result = Tensor::<f32>::rand_normal(shape, 0.0, -1.0, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(GraphError::InvalidDistribution(_))));
}

#[test]
fn test_rand_uniform_range() {
    let shape = Shape::new(&[100]).unwrap();
    let t = Tensor::<f32>::rand_uniform(shape, -0.5, 0.5, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(t.data().iter().all(|&x| (-0.5..0.5).contains(&x)));

    let empty = Tensor::<f32>::rand_uniform(shape, 1.0, 1.0, &mut StdRng::seed_from_u64(3));
    assert!(matches!(empty, Err(GraphError::InvalidDistribution(_))));
}

#[test]
fn test_rand_uniform_rejects_non_finite_range() {
    let shape = Shape::new(&[4]).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for (low, high) in [
        (f64::NEG_INFINITY, 0.0),
        (0.0, f64::INFINITY),
        (f64::MIN, f64::MAX),
        (f64::NAN, 1.0),
    ] {
        let result = Tensor::<f64>::rand_uniform(shape, low, high, &mut rng);
        assert!(
            matches!(result, Err(GraphError::InvalidDistribution(_))),
            "[{}, {}) accepted",
            low,
            high
        );
    }
}
