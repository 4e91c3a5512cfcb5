use super::*;
use crate::utils::testing::check_tensor_near;
use approx::assert_abs_diff_eq;

fn softmax_of(data: Vec<f64>, dims: &[usize]) -> Tensor<f64> {
    let a = Tensor::from_vec(data, dims).unwrap();
    let mut out = Tensor::zeros_like(&a);
    softmax_forward(&a, &mut out).unwrap();
    out
}

#[test]
fn test_softmax_forward_known_values() {
    let s = softmax_of(vec![1.0, 2.0, 3.0], &[1, 3]);
    check_tensor_near(&s, &[1, 3], &[0.0900, 0.2447, 0.6652], 1e-3);
}

#[test]
fn test_softmax_is_a_distribution_for_large_inputs() {
    let s = softmax_of(vec![1000.0, 1001.0, -1000.0, 999.5], &[2, 2]);
    assert!(s.data().iter().all(|&p| (0.0..=1.0).contains(&p)));
    assert_abs_diff_eq!(s.sum(), 1.0, epsilon = 1e-12);
    assert!(s.data().iter().all(|p| p.is_finite()));
}

#[test]
fn test_softmax_spans_the_whole_buffer() {
    // Two rows are normalized together, not per row
    let s = softmax_of(vec![0.0, 0.0, 0.0, 0.0], &[2, 2]);
    check_tensor_near(&s, &[2, 2], &[0.25, 0.25, 0.25, 0.25], 1e-12);
}

#[test]
fn test_softmax_backward_matches_full_jacobian() {
    let s = softmax_of(vec![0.3, -1.2, 2.0, 0.7], &[4]);
    let g = Tensor::from_vec(vec![1.0, -0.5, 0.25, 2.0], &[4]).unwrap();
    let grad = softmax_backward(&s, &g).unwrap();

    let sv = s.data();
    let gv = g.data();
    for i in 0..4 {
        let mut expected = 0.0;
        for j in 0..4 {
            let jac = if i == j { sv[i] * (1.0 - sv[i]) } else { -sv[i] * sv[j] };
            expected += gv[j] * jac;
        }
        assert_abs_diff_eq!(grad.data()[i], expected, epsilon = 1e-12);
    }
}

#[test]
fn test_softmax_backward_uniform_upstream_is_zero() {
    // Softmax is invariant to shifts, so a constant upstream gradient cancels
    let s = softmax_of(vec![1.0, 2.0, 3.0], &[3]);
    let g = Tensor::ones(s.shape());
    let grad = softmax_backward(&s, &g).unwrap();
    grad.data()
        .iter()
        .for_each(|&v| assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12));
}
