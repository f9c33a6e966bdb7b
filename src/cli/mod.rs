// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and routes each
// subcommand to its use case. All work happens in Layer 2.
//
//   1. `train`   — train on a CSV file, checkpoint every epoch
//   2. `plot`    — render a saved history.json
//   3. `summary` — print a classifier's layers and parameter count

pub mod commands;

use anyhow::Result;
use burn::backend::NdArray;
use clap::Parser;
use commands::{Commands, PlotArgs, SummaryArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "heart-trainer",
    version,
    about = "Train a tabular classifier with Burn, then inspect and plot the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Plot(args)    => run_plot(args),
            Commands::Summary(args) => run_summary(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}'", args.data.display());
    let checkpoint_dir = args.checkpoint_dir.clone();
    let history = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Training complete: {} epochs. History saved to '{}'.",
        history.epochs(),
        checkpoint_dir.join("history.json").display()
    );
    Ok(())
}

fn run_plot(args: PlotArgs) -> Result<()> {
    use crate::application::plot_use_case::PlotUseCase;

    let text = PlotUseCase::new(args.history, args.width, args.height).execute()?;
    print!("{text}");
    Ok(())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    use crate::ml::{model::ClassifierConfig, summary::show_summary};

    let device = Default::default();
    let model  = ClassifierConfig::new(args.features, args.classes)
        .with_hidden(args.hidden)
        .init::<NdArray>(&device);
    show_summary::<NdArray, _>(&model);
    Ok(())
}
