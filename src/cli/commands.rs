// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `plot` and `summary`
// and all their configurable flags.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::train_use_case::{DeviceKind, TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a classifier on a CSV file and record its history
    Train(TrainArgs),

    /// Plot accuracy and loss curves from a saved history.json
    Plot(PlotArgs),

    /// Print the layer summary and parameter count of a classifier
    Summary(SummaryArgs),
}

/// Compute device for tensors.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    Cpu,
    Gpu,
}

impl From<DeviceArg> for DeviceKind {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu => DeviceKind::Cpu,
            DeviceArg::Gpu => DeviceKind::Gpu,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file: feature columns followed by an integer label column
    #[arg(long, default_value = "data/heart.csv")]
    pub data: PathBuf,

    /// Directory for checkpoints, metrics.csv and history.json
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of samples per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Width of the hidden layer
    #[arg(long, default_value_t = 64)]
    pub hidden: usize,

    /// Dropout probability after the hidden layer (training only)
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Fraction of rows used for training; the rest is validation
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for the train/validation split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,

    /// Render accuracy/loss curves when training finishes
    #[arg(long)]
    pub plot: bool,
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:      a.data,
            checkpoint_dir: a.checkpoint_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            hidden:         a.hidden,
            dropout:        a.dropout,
            train_fraction: a.train_fraction,
            seed:           a.seed,
            device:         a.device.into(),
            plot:           a.plot,
        }
    }
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// history.json written by `train`
    #[arg(long, default_value = "checkpoints/history.json")]
    pub history: PathBuf,

    /// Width of each chart in pixels
    #[arg(long, default_value_t = 60)]
    pub width: u32,

    /// Height of each chart in pixels
    #[arg(long, default_value_t = 20)]
    pub height: u32,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Number of input features
    #[arg(long)]
    pub features: usize,

    #[arg(long, default_value_t = 2)]
    pub classes: usize,

    #[arg(long, default_value_t = 64)]
    pub hidden: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_args_map_to_config() {
        let cli = Cli::try_parse_from([
            "heart-trainer", "train", "--data", "x.csv", "--epochs", "3", "--device", "gpu",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.data_path, PathBuf::from("x.csv"));
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.lr, 0.01);
        assert_eq!(cfg.device, DeviceKind::Gpu);
    }

    #[test]
    fn test_summary_requires_features() {
        assert!(Cli::try_parse_from(["heart-trainer", "summary"]).is_err());
    }
}
