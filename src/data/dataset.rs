use burn::data::dataset::Dataset;

use crate::domain::sample::TabularSample;

/// In-memory dataset of labelled rows for Burn's DataLoader.
pub struct TabularDataset {
    samples: Vec<TabularSample>,
}

impl TabularDataset {
    pub fn new(samples: Vec<TabularSample>) -> Self { Self { samples } }

    pub fn num_features(&self) -> usize {
        self.samples.first().map(TabularSample::num_features).unwrap_or(0)
    }
}

impl Dataset<TabularSample> for TabularDataset {
    fn get(&self, index: usize) -> Option<TabularSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_get_and_len() {
        let ds = TabularDataset::new(vec![
            TabularSample::new(vec![1.0, 2.0], 0),
            TabularSample::new(vec![3.0, 4.0], 1),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.num_features(), 2);
        assert_eq!(ds.get(1).map(|s| s.label), Some(1));
        assert!(ds.get(2).is_none());
    }
}
