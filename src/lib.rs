//! Training helpers over Burn: one-epoch training and evaluation,
//! explicit device transfer, model summaries, and accuracy/loss plots,
//! plus the CLI that wires them into a run over a tabular CSV file.

#![recursion_limit = "256"]

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;

pub use data::batcher::ClassificationBatch;
pub use domain::history::History;
pub use infra::plot::{plot_results, HistoryPlot};
pub use ml::{
    device::to_device,
    evaluator::evaluate_epoch,
    loss::{CrossEntropy, LossFn},
    model::Network,
    summary::{show_summary, ModelSummary},
    trainer::{adam_trainer, train_epoch, EpochStats, EpochTrainer, TrainError, TrainFailure, TrainOptions},
};
