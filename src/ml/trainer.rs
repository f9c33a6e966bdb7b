// ============================================================
// Layer 5 — Epoch Trainer
// ============================================================
// One full pass over a batch source:
//
//   for each batch:
//     move features/labels to the device
//     forward → loss → backward → optimiser step
//     accumulate loss, correct predictions, sample count
//
//   return (loss_sum / samples, correct / samples)
//
// Training mode is the autodiff backend: a model on
// `B: AutodiffBackend` has dropout active and records the graph.
// Evaluation runs on `model.valid()` (see evaluator.rs).
//
// Burn builds a fresh gradient set on every `loss.backward()`,
// so nothing has to be zeroed between batches.
//
// Two ways in:
//   - `train_epoch`             builds a fresh Adam for this call only
//   - `EpochTrainer::train_epoch` uses a caller-owned optimiser that
//                               keeps its state across epochs
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::batcher::ClassificationBatch;
use crate::ml::{loss::LossFn, model::Network};

/// Learning rate used when no optimiser is supplied.
pub const DEFAULT_LR: f64 = 0.01;

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("data source yielded no samples")]
    EmptyDataSource,

    #[error("loss must be a scalar, got a tensor with {elements} elements")]
    NonScalarLoss { elements: usize },

    #[error("network has no trainable parameters")]
    NoTrainableParameters,

    #[error("batch has {features} feature rows but {labels} labels")]
    BatchSizeMismatch { features: usize, labels: usize },
}

/// A failed epoch. Carries the network back to the caller; any
/// optimiser steps taken before the failing batch stay applied.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct TrainFailure<M> {
    pub model: M,
    pub error: TrainError,
}

impl<M> TrainFailure<M> {
    fn new(model: M, error: TrainError) -> Self {
        Self { model, error }
    }
}

/// Result of one pass over a batch source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// Sum of per-batch loss values divided by `samples`
    pub loss:     f64,
    /// Correct arg-max predictions divided by `samples`, in [0, 1]
    pub accuracy: f64,
    /// Sum of all batch sizes seen
    pub samples:  usize,
    pub batches:  usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    pub lr: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self { lr: DEFAULT_LR }
    }
}

// ─── Running totals ───────────────────────────────────────────────────────────
#[derive(Debug, Default)]
pub(crate) struct RunningTotals {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
    batches:  usize,
}

impl RunningTotals {
    pub(crate) fn add(&mut self, loss: f64, correct: usize, batch_size: usize) {
        self.loss_sum += loss;
        self.correct  += correct;
        self.samples  += batch_size;
        self.batches  += 1;
    }

    pub(crate) fn finish(self) -> Result<EpochStats, TrainError> {
        if self.samples == 0 {
            return Err(TrainError::EmptyDataSource);
        }
        let n = self.samples as f64;
        Ok(EpochStats {
            loss:     self.loss_sum / n,
            accuracy: self.correct as f64 / n,
            samples:  self.samples,
            batches:  self.batches,
        })
    }
}

pub(crate) fn check_batch<B: Backend, const D: usize>(
    batch: &ClassificationBatch<B, D>,
) -> Result<usize, TrainError> {
    let features = batch.features.dims()[0];
    let labels   = batch.batch_size();
    if features != labels {
        return Err(TrainError::BatchSizeMismatch { features, labels });
    }
    Ok(labels)
}

pub(crate) fn scalar_loss<B: Backend>(loss: &Tensor<B, 1>) -> Result<f64, TrainError> {
    let elements = loss.shape().num_elements();
    if elements != 1 {
        return Err(TrainError::NonScalarLoss { elements });
    }
    Ok(loss.clone().into_scalar().elem::<f64>())
}

/// Count rows whose arg-max class equals the label.
pub(crate) fn count_correct<B: Backend>(
    output: Tensor<B, 2>,
    labels: Tensor<B, 1, Int>,
) -> usize {
    // argmax(1) returns [batch, 1]; flatten to [batch] before comparing
    let predicted = output.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted.equal(labels).int().sum().into_scalar().elem::<i64>();
    correct as usize
}

// ─── EpochTrainer ─────────────────────────────────────────────────────────────
/// Holds an optimiser and learning rate across epochs.
pub struct EpochTrainer<O> {
    optimizer: O,
    lr:        f64,
}

impl<O> EpochTrainer<O> {
    pub fn new(optimizer: O, lr: f64) -> Self {
        Self { optimizer, lr }
    }

    /// Run one epoch with the held optimiser. Returns the updated model.
    pub fn train_epoch<B, M, L, I, const D: usize>(
        &mut self,
        model:   M,
        batches: I,
        loss_fn: &L,
        device:  &B::Device,
    ) -> Result<(M, EpochStats), TrainFailure<M>>
    where
        B: AutodiffBackend,
        M: Network<B, D> + AutodiffModule<B>,
        O: Optimizer<M, B>,
        L: LossFn<B>,
        I: IntoIterator<Item = ClassificationBatch<B, D>>,
    {
        run_epoch(model, batches, loss_fn, &mut self.optimizer, self.lr, device)
    }
}

/// An `EpochTrainer` over Adam with default betas and epsilon.
pub fn adam_trainer<B, M>(lr: f64) -> EpochTrainer<impl Optimizer<M, B>>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    EpochTrainer::new(AdamConfig::new().init::<B, M>(), lr)
}

/// Run one epoch with a fresh Adam optimiser at `options.lr`.
///
/// The optimiser lives only for this call; to carry its moment
/// estimates between epochs use [`EpochTrainer`].
pub fn train_epoch<B, M, L, I, const D: usize>(
    model:   M,
    batches: I,
    loss_fn: &L,
    options: &TrainOptions,
    device:  &B::Device,
) -> Result<(M, EpochStats), TrainFailure<M>>
where
    B: AutodiffBackend,
    M: Network<B, D> + AutodiffModule<B>,
    L: LossFn<B>,
    I: IntoIterator<Item = ClassificationBatch<B, D>>,
{
    if model.num_params() == 0 {
        return Err(TrainFailure::new(model, TrainError::NoTrainableParameters));
    }
    let mut optim = AdamConfig::new().init::<B, M>();
    run_epoch(model, batches, loss_fn, &mut optim, options.lr, device)
}

fn run_epoch<B, M, O, L, I, const D: usize>(
    mut model: M,
    batches:   I,
    loss_fn:   &L,
    optim:     &mut O,
    lr:        f64,
    device:    &B::Device,
) -> Result<(M, EpochStats), TrainFailure<M>>
where
    B: AutodiffBackend,
    M: Network<B, D> + AutodiffModule<B>,
    O: Optimizer<M, B>,
    L: LossFn<B>,
    I: IntoIterator<Item = ClassificationBatch<B, D>>,
{
    let mut totals = RunningTotals::default();

    for batch in batches {
        let step = forward_batch(&model, batch.to_device(device), loss_fn);
        let (loss, loss_value, correct, batch_size) = match step {
            Ok(step)   => step,
            Err(error) => return Err(TrainFailure::new(model, error)),
        };

        // Backward pass + optimiser update
        let grads = GradientsParams::from_grads(loss.backward(), &model);
        model     = optim.step(lr, model, grads);

        totals.add(loss_value, correct, batch_size);
    }

    let stats = match totals.finish() {
        Ok(stats)  => stats,
        Err(error) => return Err(TrainFailure::new(model, error)),
    };
    tracing::debug!(
        "Epoch pass: {} batches, {} samples, loss={:.4}, acc={:.4}",
        stats.batches, stats.samples, stats.loss, stats.accuracy
    );
    Ok((model, stats))
}

// Forward + loss for one batch: (loss tensor, loss value, correct, batch size).
fn forward_batch<B, M, L, const D: usize>(
    model:   &M,
    batch:   ClassificationBatch<B, D>,
    loss_fn: &L,
) -> Result<(Tensor<B, 1>, f64, usize, usize), TrainError>
where
    B: AutodiffBackend,
    M: Network<B, D>,
    L: LossFn<B>,
{
    let batch_size = check_batch(&batch)?;

    let output     = model.forward(batch.features);
    let loss       = loss_fn.loss(output.clone(), batch.labels.clone());
    let loss_value = scalar_loss(&loss)?;
    let correct    = count_correct(output, batch.labels);

    Ok((loss, loss_value, correct, batch_size))
}
