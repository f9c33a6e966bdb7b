// ============================================================
// Layer 3 — Tabular Sample
// ============================================================
// One row of the dataset after parsing: a fixed-width feature
// vector and an integer class label.
//
// Example (heart-disease layout, 13 features + target):
//   63,1,3,145,233,1,0,150,0,2.3,0,0,1,1
//   → features = [63.0, 1.0, ..., 1.0], label = 1

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularSample {
    pub features: Vec<f32>,
    pub label:    usize,
}

impl TabularSample {
    pub fn new(features: Vec<f32>, label: usize) -> Self {
        Self { features, label }
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}

/// Number of distinct classes implied by the labels (max label + 1).
/// Returns 0 for an empty slice.
pub fn num_classes(samples: &[TabularSample]) -> usize {
    samples.iter().map(|s| s.label.saturating_add(1)).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_classes_from_max_label() {
        let samples = vec![
            TabularSample::new(vec![0.0], 0),
            TabularSample::new(vec![1.0], 2),
            TabularSample::new(vec![2.0], 1),
        ];
        assert_eq!(num_classes(&samples), 3);
    }

    #[test]
    fn test_num_classes_empty() {
        assert_eq!(num_classes(&[]), 0);
    }
}
