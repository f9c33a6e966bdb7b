// ============================================================
// Layer 2 — PlotUseCase
// ============================================================
// Loads a history.json written by a training run and renders
// the accuracy and loss curves to the terminal.

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::history::History;
use crate::infra::{checkpoint::read_json_file, plot::plot_history};

pub struct PlotUseCase {
    history_path: PathBuf,
    width:        u32,
    height:       u32,
}

impl PlotUseCase {
    pub fn new(history_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self { history_path: history_path.into(), width, height }
    }

    /// Load the history and return the rendered plot text.
    pub fn execute(&self) -> Result<String> {
        let hist: History = read_json_file(&self.history_path)?;
        tracing::info!(
            "Plotting {} epochs from '{}'",
            hist.epochs(),
            self.history_path.display()
        );
        let plot = plot_history(&hist, self.width, self.height)?;
        Ok(plot.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plots_saved_history() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"{"train_acc":[0.5,0.6],"val_acc":[0.4,0.55],"train_loss":[1.0,0.8],"val_loss":[1.1,0.9]}"#,
        )
        .unwrap();

        let text = PlotUseCase::new(&path, 40, 12).execute().unwrap();
        assert!(text.contains("Validation loss"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(PlotUseCase::new("/no/such/history.json", 40, 12).execute().is_err());
    }
}
