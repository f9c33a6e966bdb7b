// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a CSV file on disk to tensor batches.
//
//   heart.csv
//       │
//       ▼
//   CsvLoader         → parses rows into TabularSamples
//       │
//       ▼
//   split_train_val   → seeded shuffle + 80/20 cut
//       │
//       ▼
//   Standardizer      → zero mean / unit variance (fit on train only)
//       │
//       ▼
//   TabularDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   ClassificationBatcher → stacks samples into [N, F] / [N] tensors
//       │
//       ▼
//   DataLoader        → feeds batches to the epoch trainer
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads labelled rows from a CSV file
pub mod loader;

/// Per-feature standardisation fitted on the training split
pub mod preprocessor;

/// Implements Burn's Dataset trait for tabular samples
pub mod dataset;

/// Implements Burn's Batcher trait and defines ClassificationBatch
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
