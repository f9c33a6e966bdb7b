// ============================================================
// Layer 4 — Classification Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TabularSample>
// into one feature matrix and one label vector.
//
//   Input:  N samples, each with F features
//   Output: features [N, F] (Float), labels [N] (Int)
//
// Features are flattened row-major and reshaped:
//   [s1_f1, ..., s1_fF, s2_f1, ..., sN_fF] → [N, F]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::TabularSample;

// ─── ClassificationBatch ──────────────────────────────────────────────────────
/// One training step's worth of paired features and labels.
/// Both tensors share the same leading dimension (batch size).
///
/// D is the rank of the feature tensor: 2 for tabular rows,
/// higher for images or sequences.
#[derive(Debug, Clone)]
pub struct ClassificationBatch<B: Backend, const D: usize> {
    /// Input features — shape: [batch_size, ...]
    pub features: Tensor<B, D>,

    /// Ground truth class indices — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend, const D: usize> ClassificationBatch<B, D> {
    pub fn new(features: Tensor<B, D>, labels: Tensor<B, 1, Int>) -> Self {
        Self { features, labels }
    }

    /// Number of samples, taken from the labels.
    pub fn batch_size(&self) -> usize {
        self.labels.dims()[0]
    }

    /// Move both tensors to `device`, keeping their pairing.
    pub fn to_device(self, device: &B::Device) -> Self {
        Self {
            features: self.features.to_device(device),
            labels:   self.labels.to_device(device),
        }
    }
}

// ─── ClassificationBatcher ────────────────────────────────────────────────────
#[derive(Clone, Debug, Default)]
pub struct ClassificationBatcher;

impl ClassificationBatcher {
    pub fn new() -> Self {
        Self
    }

    /// Stack `items` into a batch on `device`.
    ///
    /// Panics if `items` is empty, rows differ in width, or a label
    /// does not fit an `i64`, the same way Burn's own batchers do.
    pub fn build<B: Backend>(
        &self,
        items:  &[TabularSample],
        device: &B::Device,
    ) -> ClassificationBatch<B, 2> {
        let batch_size = items.len();
        let width      = items[0].num_features();

        assert!(
            items.iter().all(|s| s.num_features() == width),
            "all samples in a batch must have the same number of features"
        );
        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<i64> = items
            .iter()
            .map(|s| {
                i64::try_from(s.label)
                    .unwrap_or_else(|_| panic!("label {} does not fit an Int tensor", s.label))
            })
            .collect();

        let features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), device)
            .reshape([batch_size, width]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), device);

        ClassificationBatch { features, labels }
    }
}

// The DataLoader calls .batch(items, device) with each mini-batch.
impl<B: Backend> Batcher<B, TabularSample, ClassificationBatch<B, 2>> for ClassificationBatcher {
    fn batch(&self, items: Vec<TabularSample>, device: &B::Device) -> ClassificationBatch<B, 2> {
        self.build::<B>(&items, device)
    }
}
