// ============================================================
// Layer 5 — Loss Functions
// ============================================================
// The trainer is generic over anything that turns
// (class scores, labels) into a loss tensor. Closures work
// directly; `CrossEntropy` wraps Burn's CrossEntropyLoss.
//
// A loss is expected to be a scalar: a rank-1 tensor with
// exactly one element. The trainer checks this per batch.

use burn::{
    nn::loss::{CrossEntropyLoss, CrossEntropyLossConfig},
    prelude::*,
};

pub trait LossFn<B: Backend> {
    /// output: [batch, classes], labels: [batch] → loss: [1]
    fn loss(&self, output: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1>;
}

impl<B, F> LossFn<B> for F
where
    B: Backend,
    F: Fn(Tensor<B, 2>, Tensor<B, 1, Int>) -> Tensor<B, 1>,
{
    fn loss(&self, output: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        self(output, labels)
    }
}

/// Mean cross-entropy over the batch, computed from raw logits.
#[derive(Debug)]
pub struct CrossEntropy<B: Backend> {
    inner: CrossEntropyLoss<B>,
}

impl<B: Backend> CrossEntropy<B> {
    pub fn new(device: &B::Device) -> Self {
        Self { inner: CrossEntropyLossConfig::new().init(device) }
    }
}

impl<B: Backend> LossFn<B> for CrossEntropy<B> {
    fn loss(&self, output: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        self.inner.forward(output, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_cross_entropy_is_scalar_and_positive() {
        let device = Default::default();
        let logits = Tensor::<TestBackend, 2>::from_floats([[2.0, 0.0], [0.0, 2.0]], &device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0, 0], &device);
        let loss   = CrossEntropy::new(&device).loss(logits, labels);
        assert_eq!(loss.dims(), [1]);
        assert!(loss.into_scalar().elem::<f64>() > 0.0);
    }

    #[test]
    fn test_closure_is_a_loss() {
        let device = Default::default();
        let mean   = |out: Tensor<TestBackend, 2>, _labels: Tensor<TestBackend, 1, Int>| out.mean();
        let logits = Tensor::<TestBackend, 2>::from_floats([[1.0, 3.0]], &device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([1], &device);
        assert_eq!(mean.loss(logits, labels).into_scalar().elem::<f32>(), 2.0);
    }
}
