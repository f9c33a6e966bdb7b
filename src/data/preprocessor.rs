// ============================================================
// Layer 4 — Feature Standardiser
// ============================================================
// Rescales every feature column to zero mean and unit variance:
//
//   x' = (x - mean) / std
//
// The statistics are fitted on the TRAINING split only and then
// applied unchanged to the validation split, so no information
// from validation rows leaks into training.
//
// Constant columns (std == 0) are centred but not scaled.
//
// The fitted statistics are serialisable so the same transform
// can be saved next to a checkpoint.

use serde::{Deserialize, Serialize};

use crate::domain::sample::TabularSample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f32>,
    pub std:  Vec<f32>,
}

impl Standardizer {
    /// Compute per-column mean and population standard deviation.
    /// An empty slice yields an empty (identity) standardiser.
    pub fn fit(samples: &[TabularSample]) -> Self {
        let Some(first) = samples.first() else {
            return Self { mean: Vec::new(), std: Vec::new() };
        };
        let width = first.num_features();
        let n     = samples.len() as f64;

        let mut sum = vec![0.0f64; width];
        for s in samples {
            for (acc, &x) in sum.iter_mut().zip(&s.features) {
                *acc += x as f64;
            }
        }
        let mean: Vec<f64> = sum.iter().map(|s| s / n).collect();

        let mut sq = vec![0.0f64; width];
        for s in samples {
            for ((acc, &x), m) in sq.iter_mut().zip(&s.features).zip(&mean) {
                let d = x as f64 - m;
                *acc += d * d;
            }
        }

        Self {
            mean: mean.iter().map(|&m| m as f32).collect(),
            std:  sq.iter().map(|&v| (v / n).sqrt() as f32).collect(),
        }
    }

    pub fn transform(&self, sample: &TabularSample) -> TabularSample {
        let features = sample
            .features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mean = self.mean.get(i).copied().unwrap_or(0.0);
                let std  = self.std.get(i).copied().unwrap_or(1.0);
                if std > f32::EPSILON { (x - mean) / std } else { x - mean }
            })
            .collect();
        TabularSample::new(features, sample.label)
    }

    pub fn transform_all(&self, samples: &[TabularSample]) -> Vec<TabularSample> {
        samples.iter().map(|s| self.transform(s)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<TabularSample> {
        vec![
            TabularSample::new(vec![1.0, 5.0], 0),
            TabularSample::new(vec![3.0, 5.0], 1),
        ]
    }

    #[test]
    fn test_fit_mean_and_std() {
        let st = Standardizer::fit(&samples());
        assert_eq!(st.mean, vec![2.0, 5.0]);
        assert_eq!(st.std,  vec![1.0, 0.0]);
    }

    #[test]
    fn test_transform_centres_and_scales() {
        let st  = Standardizer::fit(&samples());
        let out = st.transform_all(&samples());
        assert_eq!(out[0].features, vec![-1.0, 0.0]);
        assert_eq!(out[1].features, vec![1.0, 0.0]);
        assert_eq!(out[1].label, 1);
    }

    #[test]
    fn test_fit_empty_is_identity() {
        let st = Standardizer::fit(&[]);
        let s  = TabularSample::new(vec![4.0], 0);
        assert_eq!(st.transform(&s), s);
    }
}
