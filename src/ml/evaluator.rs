// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Forward-only pass over a batch source with the same accounting
// as the epoch trainer, minus backward and the optimiser step.
//
// Call it on `model.valid()` so it runs on the inner backend:
// no autodiff graph, dropout disabled.

use burn::prelude::*;

use crate::data::batcher::ClassificationBatch;
use crate::ml::{
    loss::LossFn,
    model::Network,
    trainer::{check_batch, count_correct, scalar_loss, EpochStats, RunningTotals, TrainError},
};

pub fn evaluate_epoch<B, M, L, I, const D: usize>(
    model:   &M,
    batches: I,
    loss_fn: &L,
    device:  &B::Device,
) -> Result<EpochStats, TrainError>
where
    B: Backend,
    M: Network<B, D>,
    L: LossFn<B>,
    I: IntoIterator<Item = ClassificationBatch<B, D>>,
{
    let mut totals = RunningTotals::default();

    for batch in batches {
        let batch      = batch.to_device(device);
        let batch_size = check_batch(&batch)?;

        let output     = model.forward(batch.features);
        let loss       = loss_fn.loss(output.clone(), batch.labels.clone());
        let loss_value = scalar_loss(&loss)?;
        let correct    = count_correct(output, batch.labels);

        totals.add(loss_value, correct, batch_size);
    }

    totals.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::ClassificationBatcher;
    use crate::domain::sample::TabularSample;
    use crate::ml::loss::CrossEntropy;
    use crate::ml::model::ClassifierConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_evaluation_does_not_change_the_model() {
        let device = Default::default();
        let model  = ClassifierConfig::new(2, 2).with_hidden(4).init::<TestBackend>(&device);
        let before = model.input.weight.val().into_data().to_vec::<f32>().unwrap();

        let samples = vec![
            TabularSample::new(vec![1.0, 0.0], 1),
            TabularSample::new(vec![-1.0, 0.0], 0),
            TabularSample::new(vec![0.5, 0.5], 1),
        ];
        let batches = vec![
            ClassificationBatcher::new().build::<TestBackend>(&samples[..2], &device),
            ClassificationBatcher::new().build::<TestBackend>(&samples[2..], &device),
        ];

        let stats = evaluate_epoch(&model, batches, &CrossEntropy::new(&device), &device).unwrap();
        assert_eq!(stats.samples, 3);
        assert_eq!(stats.batches, 2);
        assert!((0.0..=1.0).contains(&stats.accuracy));
        assert_eq!(model.input.weight.val().into_data().to_vec::<f32>().unwrap(), before);
    }

    #[test]
    fn test_perfect_predictions_score_one() {
        let device = Default::default();
        // row i has its largest score at its label
        let features = Tensor::<TestBackend, 2>::from_floats([[5.0, 0.0], [0.0, 5.0]], &device);
        let labels   = Tensor::<TestBackend, 1, Int>::from_ints([0, 1], &device);
        assert_eq!(count_correct(features, labels), 2);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let device = Default::default();
        let model  = ClassifierConfig::new(2, 2).init::<TestBackend>(&device);
        let empty: Vec<ClassificationBatch<TestBackend, 2>> = Vec::new();
        let err    = evaluate_epoch(&model, empty, &CrossEntropy::new(&device), &device).unwrap_err();
        assert!(matches!(err, TrainError::EmptyDataSource));
    }
}
