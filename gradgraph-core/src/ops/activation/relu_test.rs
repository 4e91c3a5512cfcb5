use crate::ops::activation::{relu_backward, relu_forward};
use crate::tensor::Tensor;
use approx::assert_relative_eq;

// Helper to create tensors for tests
fn create_tensor_f64(data: Vec<f64>, dims: &[usize]) -> Tensor<f64> {
    Tensor::from_vec(data, dims).unwrap()
}

#[test]
fn test_relu_forward() {
    let input = create_tensor_f64(vec![-2.0, -1.0, 0.0, 1.0, 2.0], &[5]);
    let expected = vec![0.0, 0.0, 0.0, 1.0, 2.0];
    let mut output = Tensor::zeros_like(&input);
    relu_forward(&input, &mut output).unwrap();

    assert_eq!(output.shape().dims(), &[5]);
    output
        .data()
        .iter()
        .zip(expected.iter())
        .for_each(|(o, e)| assert_relative_eq!(*o, *e));
}

#[test]
fn test_relu_backward() {
    let input = create_tensor_f64(vec![-2.0, -1.0, 0.0, 1.0, 2.0], &[5]);
    let upstream = create_tensor_f64(vec![1.0; 5], &[5]);
    let grad = relu_backward(&input, &upstream).unwrap();

    // Expected grad: upstream(1.0) * mask([0, 0, 0, 1, 1])
    assert_eq!(grad.data(), &[0.0, 0.0, 0.0, 1.0, 1.0]);
    assert_eq!(grad.shape().dims(), &[5]);
}

#[test]
fn test_relu_backward_masks_non_finite_upstream() {
    // A blocked element contributes exactly 0, even for an infinite upstream
    let input = create_tensor_f64(vec![-1.0, 3.0], &[2]);
    let upstream = create_tensor_f64(vec![f64::INFINITY, 2.0], &[2]);
    let grad = relu_backward(&input, &upstream).unwrap();
    assert_eq!(grad.data(), &[0.0, 2.0]);
}
