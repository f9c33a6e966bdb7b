// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by more than one layer:
//
//   checkpoint.rs — model weights (Burn CompactRecorder) plus the
//                   JSON artefacts of a run: config, standardiser,
//                   latest epoch pointer, history
//
//   metrics.rs    — per-epoch metrics appended to a CSV file
//
//   plot.rs       — accuracy/loss curves rendered with trueno-viz

/// Model checkpoint and run artefact persistence
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// History plotting
pub mod plot;
