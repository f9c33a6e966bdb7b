// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a full training run in order:
//
//   Step 1: Load CSV rows               (Layer 4 - data)
//   Step 2: Train / validation split    (Layer 4 - data)
//   Step 3: Fit + apply standardiser    (Layer 4 - data)
//   Step 4: Save config + standardiser  (Layer 6 - infra)
//   Step 5: Build model, print summary  (Layer 5 - ml)
//   Step 6: Build Burn data loaders     (Layer 4 - data)
//   Step 7: Epoch loop                  (Layer 5 - ml)
//             train_epoch → evaluate_epoch → history,
//             metrics CSV, checkpoint
//   Step 8: Save history, plot          (Layer 6 - infra)

use anyhow::{bail, Result};
use burn::{
    backend::{Autodiff, NdArray, Wgpu},
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    tensor::backend::{AutodiffBackend, Backend},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    batcher::{ClassificationBatch, ClassificationBatcher},
    dataset::TabularDataset,
    loader::CsvLoader,
    preprocessor::Standardizer,
    splitter::split_train_val,
};
use crate::domain::{
    history::{EpochMetrics, History},
    sample::{num_classes, TabularSample},
    traits::SampleSource,
};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger, plot::plot_results};
use crate::ml::{
    evaluator::evaluate_epoch,
    loss::CrossEntropy,
    model::{Classifier, ClassifierConfig},
    summary::show_summary,
    trainer::{adam_trainer, DEFAULT_LR},
};

/// Where tensors live for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Host CPU through the ndarray backend
    Cpu,
    /// Default WGPU adapter
    Gpu,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Serialisable so it can be saved next to the checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:      PathBuf,
    pub checkpoint_dir: PathBuf,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub hidden:         usize,
    pub dropout:        f64,
    pub train_fraction: f64,
    pub seed:           u64,
    pub device:         DeviceKind,
    pub plot:           bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:      PathBuf::from("data/heart.csv"),
            checkpoint_dir: PathBuf::from("checkpoints"),
            epochs:         10,
            batch_size:     32,
            lr:             DEFAULT_LR,
            hidden:         64,
            dropout:        0.1,
            train_fraction: 0.8,
            seed:           42,
            device:         DeviceKind::Cpu,
            plot:           false,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase<S = CsvLoader> {
    config: TrainConfig,
    source: S,
}

impl TrainUseCase<CsvLoader> {
    /// Train on the CSV file named in the config
    pub fn new(config: TrainConfig) -> Self {
        let source = CsvLoader::new(&config.data_path);
        Self { config, source }
    }
}

impl<S: SampleSource> TrainUseCase<S> {
    /// Train on samples from any source
    pub fn with_source(config: TrainConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Run the pipeline on the configured device and return the history.
    pub fn execute(&self) -> Result<History> {
        match self.config.device {
            DeviceKind::Cpu => {
                let device = <NdArray as Backend>::Device::default();
                tracing::info!("Using ndarray CPU device");
                self.execute_on::<Autodiff<NdArray>>(device)
            }
            DeviceKind::Gpu => {
                let device = <Wgpu as Backend>::Device::default();
                tracing::info!("Using WGPU device: {:?}", device);
                self.execute_on::<Autodiff<Wgpu>>(device)
            }
        }
    }

    /// Run the pipeline on an explicit backend and device.
    pub fn execute_on<B: AutodiffBackend>(&self, device: B::Device) -> Result<History> {
        let cfg = &self.config;
        validate(cfg)?;

        // ── Step 1: Load samples ──────────────────────────────────────────────
        let samples = self.source.load_all()?;
        if samples.is_empty() {
            bail!("No samples found in '{}'", cfg.data_path.display());
        }
        let classes  = num_classes(&samples);
        let features = samples[0].num_features();
        if classes < 2 {
            bail!("Need at least two classes, found {classes}");
        }

        // ── Step 2: Train / validation split ──────────────────────────────────
        let (train, val) = split_train_val(samples, cfg.train_fraction, cfg.seed);
        if train.is_empty() || val.is_empty() {
            bail!(
                "Split produced {} training and {} validation samples; adjust --train-fraction",
                train.len(), val.len()
            );
        }
        tracing::info!("Split: {} train, {} validation", train.len(), val.len());

        // ── Step 3: Standardise with train statistics ─────────────────────────
        let standardizer = Standardizer::fit(&train);
        let train = standardizer.transform_all(&train);
        let val   = standardizer.transform_all(&val);

        // ── Step 4: Persist what inference would need ─────────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir)?;
        ckpt.save_config(cfg)?;
        ckpt.save_standardizer(&standardizer)?;
        let logger = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 5: Model ─────────────────────────────────────────────────────
        let model_cfg = ClassifierConfig::new(features, classes)
            .with_hidden(cfg.hidden)
            .with_dropout(cfg.dropout);
        let mut model: Classifier<B> = model_cfg.init(&device);
        show_summary::<B, _>(&model);

        // ── Step 6: Data loaders ──────────────────────────────────────────────
        // Validation runs on the inner backend: no autodiff overhead
        let train_loader =
            DataLoaderBuilder::<B, TabularSample, ClassificationBatch<B, 2>>::new(ClassificationBatcher::new())
                .batch_size(cfg.batch_size)
                .shuffle(cfg.seed)
                .num_workers(1)
                .set_device(device.clone())
                .build(TabularDataset::new(train));

        let val_loader = DataLoaderBuilder::<
            B::InnerBackend,
            TabularSample,
            ClassificationBatch<B::InnerBackend, 2>,
        >::new(ClassificationBatcher::new())
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .set_device(device.clone())
            .build(TabularDataset::new(val));

        // ── Step 7: Epoch loop ────────────────────────────────────────────────
        let mut trainer  = adam_trainer::<B, Classifier<B>>(cfg.lr);
        let train_loss   = CrossEntropy::<B>::new(&device);
        let val_loss     = CrossEntropy::<B::InnerBackend>::new(&device);
        let mut history  = History::new();

        for epoch in 1..=cfg.epochs {
            let (next, train_stats) = trainer
                .train_epoch(model, train_loader.iter(), &train_loss, &device)
                .map_err(|failure| failure.error)?;
            model = next;

            // model.valid() → Classifier<B::InnerBackend>, dropout disabled
            let valid     = model.valid();
            let val_stats = evaluate_epoch(&valid, val_loader.iter(), &val_loss, &device)?;

            let metrics = EpochMetrics::new(
                epoch,
                train_stats.loss,
                train_stats.accuracy,
                val_stats.loss,
                val_stats.accuracy,
            );
            history.push(&metrics);
            logger.log(&metrics)?;

            println!(
                "Epoch {:>3}/{} | train_loss={:.4} | train_acc={:.1}% | val_loss={:.4} | val_acc={:.1}%",
                epoch, cfg.epochs,
                metrics.train_loss, metrics.train_acc * 100.0,
                metrics.val_loss,   metrics.val_acc * 100.0,
            );

            ckpt.save_model(&model, epoch)?;
            tracing::info!("Checkpoint saved for epoch {}", epoch);
        }

        // ── Step 8: History + plot ────────────────────────────────────────────
        let path = ckpt.save_history(&history)?;
        tracing::info!("History written to '{}'", path.display());
        if let Some(best) = history.best_val_acc_epoch() {
            tracing::info!("Best validation accuracy at epoch {}", best);
        }

        if cfg.plot {
            plot_results(&history)?.show();
        }

        Ok(history)
    }
}

fn validate(cfg: &TrainConfig) -> Result<()> {
    if cfg.epochs == 0 {
        bail!("--epochs must be at least 1");
    }
    if cfg.batch_size == 0 {
        bail!("--batch-size must be at least 1");
    }
    if !(0.0..1.0).contains(&cfg.train_fraction) || cfg.train_fraction == 0.0 {
        bail!("--train-fraction must be in (0, 1), got {}", cfg.train_fraction);
    }
    if !(0.0..1.0).contains(&cfg.dropout) {
        bail!("--dropout must be in [0, 1), got {}", cfg.dropout);
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn separable(n: usize) -> Vec<TabularSample> {
        (0..n)
            .map(|i| {
                let label = i % 2;
                let x     = if label == 1 { 2.0 } else { -2.0 };
                TabularSample::new(vec![x + (i % 3) as f32 * 0.1, 1.0], label)
            })
            .collect()
    }

    fn config(dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            checkpoint_dir: dir.to_path_buf(),
            epochs:         3,
            batch_size:     8,
            lr:             0.05,
            hidden:         8,
            dropout:        0.0,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_run_writes_artefacts_and_history() {
        let dir     = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::with_source(config(dir.path()), separable(40));
        let history  = use_case.execute().unwrap();

        assert_eq!(history.epochs(), 3);
        assert!(history.is_aligned());
        assert!(history.train_acc.iter().all(|a| (0.0..=1.0).contains(a)));

        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        assert_eq!(ckpt.latest_epoch().unwrap(), 3);
        assert_eq!(ckpt.load_history().unwrap(), history);
        assert_eq!(ckpt.load_config().unwrap().epochs, 3);
        assert!(dir.path().join("metrics.csv").exists());
    }

    #[test]
    fn test_single_class_is_rejected() {
        let dir     = tempfile::tempdir().unwrap();
        let samples = vec![TabularSample::new(vec![1.0], 0); 10];
        let err     = TrainUseCase::with_source(config(dir.path()), samples).execute();
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { train_fraction: 1.0, ..config(dir.path()) };
        assert!(TrainUseCase::with_source(cfg, separable(10)).execute().is_err());
    }

    #[test]
    fn test_out_of_range_dropout_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        for dropout in [1.5, 1.0, -0.1] {
            let cfg = TrainConfig { dropout, ..config(dir.path()) };
            let err = TrainUseCase::with_source(cfg, separable(10)).execute().unwrap_err();
            assert!(err.to_string().contains("--dropout"), "{err}");
        }
    }
}
