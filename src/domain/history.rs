// ============================================================
// Layer 3 — Training History
// ============================================================
// Per-epoch scalar metrics, kept as four named series:
//
//   train_acc  — accuracy on the training set
//   val_acc    — accuracy on the validation set
//   train_loss — average loss per training sample
//   val_loss   — average loss per validation sample
//
// Serialises to JSON as a plain mapping of name → sequence:
//   {"train_acc":[0.5,0.6],"val_acc":[0.4,0.55],...}
//
// The plot renderer (Layer 6) is the only consumer that reads
// all four series together.

use serde::{Deserialize, Serialize};

/// The four metric names, in plotting order.
pub const SERIES_NAMES: [&str; 4] = ["train_acc", "val_acc", "train_loss", "val_loss"];

/// One row of metrics for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average loss per training sample
    pub train_loss: f64,

    /// Fraction of training samples classified correctly, in [0, 1]
    pub train_acc: f64,

    /// Average loss per validation sample
    pub val_loss: f64,

    /// Fraction of validation samples classified correctly, in [0, 1]
    pub val_acc: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   f64,
        val_acc:    f64,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub train_acc:  Vec<f64>,
    pub val_acc:    Vec<f64>,
    pub train_loss: Vec<f64>,
    pub val_loss:   Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one epoch to every series.
    pub fn push(&mut self, m: &EpochMetrics) {
        self.train_acc.push(m.train_acc);
        self.val_acc.push(m.val_acc);
        self.train_loss.push(m.train_loss);
        self.val_loss.push(m.val_loss);
    }

    /// Number of epochs recorded (length of the longest series).
    pub fn epochs(&self) -> usize {
        self.series()
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0)
    }

    /// True when all four series have the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.train_acc.len();
        self.series().iter().all(|(_, values)| values.len() == n)
    }

    /// All series as (name, values) pairs, in `SERIES_NAMES` order.
    pub fn series(&self) -> [(&'static str, &[f64]); 4] {
        [
            (SERIES_NAMES[0], self.train_acc.as_slice()),
            (SERIES_NAMES[1], self.val_acc.as_slice()),
            (SERIES_NAMES[2], self.train_loss.as_slice()),
            (SERIES_NAMES[3], self.val_loss.as_slice()),
        ]
    }

    /// 1-based epoch with the highest validation accuracy.
    pub fn best_val_acc_epoch(&self) -> Option<usize> {
        self.val_acc
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i + 1)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_to_every_series() {
        let mut hist = History::new();
        hist.push(&EpochMetrics::new(1, 1.0, 0.5, 1.1, 0.4));
        hist.push(&EpochMetrics::new(2, 0.8, 0.6, 0.9, 0.55));
        assert_eq!(hist.epochs(), 2);
        assert!(hist.is_aligned());
        assert_eq!(hist.train_acc, vec![0.5, 0.6]);
        assert_eq!(hist.val_loss,  vec![1.1, 0.9]);
    }

    #[test]
    fn test_json_is_a_mapping_of_four_series() {
        let json = r#"{"train_acc":[0.5,0.6],"val_acc":[0.4,0.55],
                       "train_loss":[1.0,0.8],"val_loss":[1.1,0.9]}"#;
        let hist: History = serde_json::from_str(json).unwrap();
        assert_eq!(hist.val_acc, vec![0.4, 0.55]);

        let value = serde_json::to_value(&hist).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        for name in SERIES_NAMES {
            assert!(value.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_missing_series_is_rejected() {
        let json = r#"{"train_acc":[0.5],"val_acc":[0.4],"train_loss":[1.0]}"#;
        assert!(serde_json::from_str::<History>(json).is_err());
    }

    #[test]
    fn test_best_val_acc_epoch() {
        let hist = History {
            train_acc:  vec![0.5, 0.6, 0.7],
            val_acc:    vec![0.4, 0.65, 0.6],
            train_loss: vec![1.0, 0.8, 0.7],
            val_loss:   vec![1.1, 0.9, 0.95],
        };
        assert_eq!(hist.best_val_acc_epoch(), Some(2));
        assert_eq!(History::new().best_val_acc_epoch(), None);
    }
}
