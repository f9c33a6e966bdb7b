// ============================================================
// Layer 5 — ML Layer (Burn)
// ============================================================
// All Burn-specific training code lives here.
//
//   model.rs     — Network trait + two-layer tabular classifier
//   loss.rs      — LossFn seam (closures, cross-entropy)
//   device.rs    — explicit device transfer for tensor sequences
//   summary.rs   — module tree + parameter count printer
//   trainer.rs   — one training epoch: forward, loss, backward, step
//   evaluator.rs — one forward-only pass for validation metrics
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Network trait and the default MLP classifier
pub mod model;

/// Loss function abstraction
pub mod loss;

/// Moving tensors onto a compute device
pub mod device;

/// Printing a model summary
pub mod summary;

/// The epoch training loop
pub mod trainer;

/// Validation pass
pub mod evaluator;
