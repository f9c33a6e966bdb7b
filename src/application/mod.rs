// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal.
//
// Rules for this layer:
//   - No tensor math here (that's Layer 5)
//   - No argument parsing (that's Layer 1)
//   - Only workflow coordination

// The end-to-end training workflow
pub mod train_use_case;

// Re-plotting a saved history
pub mod plot_use_case;
