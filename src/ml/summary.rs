use std::fmt;

use burn::prelude::*;

/// Printable overview of a network: its module tree as rendered by
/// Burn plus the total parameter count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub num_params: usize,
    pub tree:       String,
}

impl ModelSummary {
    pub fn of<B, M>(model: &M) -> Self
    where
        B: Backend,
        M: Module<B> + fmt::Display,
    {
        Self {
            num_params: model.num_params(),
            tree:       model.to_string(),
        }
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tree)?;
        write!(f, "Total parameters: {}", self.num_params)
    }
}

/// Print the summary of `model` to stdout and return it.
pub fn show_summary<B, M>(model: &M) -> ModelSummary
where
    B: Backend,
    M: Module<B> + fmt::Display,
{
    let summary = ModelSummary::of::<B, M>(model);
    tracing::info!("Model has {} parameters", summary.num_params);
    println!("{summary}");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::ClassifierConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_summary_counts_parameters() {
        let device  = Default::default();
        let cfg     = ClassifierConfig::new(4, 3).with_hidden(5);
        let model   = cfg.init::<TestBackend>(&device);
        let summary = show_summary::<TestBackend, _>(&model);

        assert_eq!(summary.num_params, 5 * 5 + 6 * 3);
        assert!(!summary.tree.is_empty());
        assert!(summary.to_string().ends_with("Total parameters: 43"));
    }
}
