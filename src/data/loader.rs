// ============================================================
// Layer 4 — CSV Sample Loader
// ============================================================
// Loads a tabular CSV file where every column except the last
// is a numeric feature and the last column is the class label.
//
//   age,sex,cp,trestbps,...,thal,target
//   63,1,3,145,...,1,1
//   37,1,2,130,...,2,1
//
// Rows that cannot be parsed (non-numeric cell, wrong width,
// negative, fractional or oversized label) are skipped with a warning
// rather than aborting the whole load.

use anyhow::{bail, Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::sample::TabularSample;
use crate::domain::traits::SampleSource;

/// Loads labelled samples from a delimited text file.
/// Implements the SampleSource trait from Layer 3.
pub struct CsvLoader {
    path:       PathBuf,
    has_header: bool,
    delimiter:  char,
}

impl CsvLoader {
    /// Create a loader for a comma-separated file with a header row
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), has_header: true, delimiter: ',' }
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV text that is already in memory.
    pub fn parse(&self, text: &str) -> Result<Vec<TabularSample>> {
        let mut samples = Vec::new();
        let mut width: Option<usize> = None;

        let rows = text
            .lines()
            .enumerate()
            .skip(usize::from(self.has_header))
            .filter(|(_, line)| !line.trim().is_empty());

        for (line_no, line) in rows {
            match parse_row(line, self.delimiter) {
                Ok(sample) => {
                    let w = *width.get_or_insert(sample.num_features());
                    if sample.num_features() != w {
                        tracing::warn!(
                            "Skipping line {}: expected {} features, found {}",
                            line_no + 1, w, sample.num_features()
                        );
                        continue;
                    }
                    samples.push(sample);
                }
                Err(e) => {
                    tracing::warn!("Skipping line {}: {}", line_no + 1, e);
                }
            }
        }

        Ok(samples)
    }
}

impl SampleSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<TabularSample>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;
        let samples = self.parse(&text)?;
        tracing::info!(
            "Loaded {} samples from '{}'",
            samples.len(),
            self.path.display()
        );
        Ok(samples)
    }
}

/// Parse one row: all cells but the last are features, the last is the label.
fn parse_row(line: &str, delimiter: char) -> Result<TabularSample> {
    let cells: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    if cells.len() < 2 {
        bail!("need at least one feature column and a label column");
    }

    let (feature_cells, label_cell) = cells.split_at(cells.len() - 1);
    let features = feature_cells
        .iter()
        .map(|c| {
            c.parse::<f32>()
                .with_context(|| format!("non-numeric feature '{c}'"))
        })
        .collect::<Result<Vec<f32>>>()?;

    let label = parse_label(label_cell[0])?;
    Ok(TabularSample::new(features, label))
}

/// Largest class index accepted from a file. The label sets the
/// width of the output layer, so it is kept small.
pub const MAX_LABEL: usize = u16::MAX as usize;

// Labels are often written as floats ("1.0") by export tools.
fn parse_label(cell: &str) -> Result<usize> {
    let value: f64 = cell
        .parse()
        .with_context(|| format!("non-numeric label '{cell}'"))?;
    if value < 0.0 || value.fract() != 0.0 {
        bail!("label '{cell}' is not a non-negative integer");
    }
    if value > MAX_LABEL as f64 {
        bail!("label '{cell}' exceeds the largest class index {MAX_LABEL}");
    }
    Ok(value as usize)
}
