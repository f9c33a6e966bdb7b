//! Side-by-side accuracy and loss curves for a training [`History`].
//!
//! Rasterisation is done by trueno-viz; this module only feeds it the
//! four series and lays the two charts out next to each other with a
//! legend line under each.

use anyhow::{anyhow, Result};
use trueno_viz::output::{TerminalEncoder, TerminalMode};
use trueno_viz::plots::{LossCurve, MetricSeries};
use trueno_viz::prelude::{Rgba, WithDimensions};

use crate::domain::history::History;

pub const TRAIN_ACC_LABEL:  &str = "Training acc";
pub const VAL_ACC_LABEL:    &str = "Validation acc";
pub const TRAIN_LOSS_LABEL: &str = "Training loss";
pub const VAL_LOSS_LABEL:   &str = "Validation loss";

const TRAIN_COLOR: (u8, u8, u8) = (66, 133, 244);
const VAL_COLOR:   (u8, u8, u8) = (255, 128, 0);
const GAP: usize = 4;

/// One chart panel: a curve plus the labels of its two series.
struct Panel {
    curve:  LossCurve,
    labels: [&'static str; 2],
}

impl Panel {
    fn new(
        labels:          [&'static str; 2],
        train:           &[f64],
        val:             &[f64],
        width:           u32,
        height:          u32,
        lower_is_better: bool,
    ) -> Result<Self> {
        let (tr, tg, tb) = TRAIN_COLOR;
        let (vr, vg, vb) = VAL_COLOR;
        let mut curve = LossCurve::new()
            .add_series(MetricSeries::new(labels[0], Rgba::rgb(tr, tg, tb)))
            .add_series(MetricSeries::new(labels[1], Rgba::rgb(vr, vg, vb)))
            .dimensions(width, height)
            .margin(2)
            .best_markers(true)
            .lower_is_better(lower_is_better)
            .build()
            .map_err(|e| anyhow!("cannot build '{}' chart: {e:?}", labels[0]))?;

        for &v in train {
            curve.push(0, v as f32);
        }
        for &v in val {
            curve.push(1, v as f32);
        }
        Ok(Self { curve, labels })
    }

    fn render(&self, width: u32, height: u32) -> Vec<String> {
        let mut lines: Vec<String> = if self.curve.max_epochs() < 2 {
            vec![String::from("(need at least two epochs to draw a curve)")]
        } else {
            match self.curve.to_framebuffer() {
                Ok(fb) => TerminalEncoder::new()
                    .mode(TerminalMode::UnicodeHalfBlock)
                    .width(width)
                    // Terminal cells are roughly 2:1
                    .height(height / 2)
                    .render(&fb)
                    .lines()
                    .map(str::to_string)
                    .collect(),
                Err(_) => vec![String::from("(render error)")],
            }
        };
        lines.push(legend(self.labels));
        lines
    }
}

fn legend(labels: [&'static str; 2]) -> String {
    let swatch = |(r, g, b): (u8, u8, u8)| format!("\x1b[38;2;{r};{g};{b}m──\x1b[0m");
    format!(
        "{} {}   {} {}",
        swatch(TRAIN_COLOR), labels[0],
        swatch(VAL_COLOR),   labels[1],
    )
}

// Visible width, ignoring ANSI colour escapes.
fn visible_width(s: &str) -> usize {
    let mut width  = 0;
    let mut escape = false;
    for c in s.chars() {
        match (escape, c) {
            (false, '\x1b') => escape = true,
            (true, 'm')     => escape = false,
            (true, _)       => {}
            (false, _)      => width += 1,
        }
    }
    width
}

/// Two charts built from a [`History`]: accuracy on the left,
/// loss on the right.
pub struct HistoryPlot {
    accuracy: Panel,
    loss:     Panel,
    width:    u32,
    height:   u32,
}

impl HistoryPlot {
    /// The four series drawn, left chart first.
    pub fn series_labels(&self) -> [&'static str; 4] {
        [
            self.accuracy.labels[0],
            self.accuracy.labels[1],
            self.loss.labels[0],
            self.loss.labels[1],
        ]
    }

    /// Number of epochs on the x axis.
    pub fn epochs(&self) -> usize {
        self.accuracy.curve.max_epochs().max(self.loss.curve.max_epochs())
    }

    /// Render both charts side by side as terminal text.
    pub fn render(&self) -> String {
        let left  = self.accuracy.render(self.width, self.height);
        let right = self.loss.render(self.width, self.height);
        let col   = left.iter().map(|l| visible_width(l)).max().unwrap_or(0) + GAP;

        let rows = left.len().max(right.len());
        let mut out = String::new();
        for i in 0..rows {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            out.push_str(l);
            out.push_str(&" ".repeat(col - visible_width(l)));
            out.push_str(r);
            out.push('\n');
        }
        out
    }

    pub fn show(&self) {
        print!("{}", self.render());
    }
}

/// Build the accuracy/loss plot for `hist` with panels of
/// `width` x `height` pixels each.
pub fn plot_history(hist: &History, width: u32, height: u32) -> Result<HistoryPlot> {
    if !hist.is_aligned() {
        tracing::warn!("History series have different lengths; plotting as recorded");
    }

    let accuracy = Panel::new(
        [TRAIN_ACC_LABEL, VAL_ACC_LABEL],
        &hist.train_acc,
        &hist.val_acc,
        width,
        height,
        false,
    )?;
    let loss = Panel::new(
        [TRAIN_LOSS_LABEL, VAL_LOSS_LABEL],
        &hist.train_loss,
        &hist.val_loss,
        width,
        height,
        true,
    )?;

    Ok(HistoryPlot { accuracy, loss, width, height })
}

/// Build the plot at the default panel size (60 x 20).
pub fn plot_results(hist: &History) -> Result<HistoryPlot> {
    plot_history(hist, 60, 20)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_history() -> History {
        History {
            train_acc:  vec![0.5, 0.6],
            val_acc:    vec![0.4, 0.55],
            train_loss: vec![1.0, 0.8],
            val_loss:   vec![1.1, 0.9],
        }
    }

    #[test]
    fn test_reference_history_plots_four_series() {
        let plot = plot_results(&reference_history()).unwrap();
        assert_eq!(
            plot.series_labels(),
            ["Training acc", "Validation acc", "Training loss", "Validation loss"],
        );
        assert_eq!(plot.epochs(), 2);

        let text = plot.render();
        for label in plot.series_labels() {
            assert_eq!(text.matches(label).count(), 1, "label {label}");
        }
    }

    #[test]
    fn test_single_epoch_renders_placeholder() {
        let hist = History {
            train_acc:  vec![0.5],
            val_acc:    vec![0.4],
            train_loss: vec![1.0],
            val_loss:   vec![1.1],
        };
        let text = plot_results(&hist).unwrap().render();
        assert!(text.contains("need at least two epochs"));
    }

    #[test]
    fn test_visible_width_skips_escapes() {
        assert_eq!(visible_width("\x1b[38;2;1;2;3m──\x1b[0m ab"), 5);
    }
}
