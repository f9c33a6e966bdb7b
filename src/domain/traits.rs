// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits so the
// concrete data source can be swapped without touching it:
//   - CsvLoader implements SampleSource
//   - tests use an in-memory source

use anyhow::Result;
use crate::domain::sample::TabularSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled samples.
pub trait SampleSource {
    /// Load every available sample from this source.
    fn load_all(&self) -> Result<Vec<TabularSample>>;
}

impl SampleSource for Vec<TabularSample> {
    fn load_all(&self) -> Result<Vec<TabularSample>> {
        Ok(self.clone())
    }
}
