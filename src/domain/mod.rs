// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing what a training run works with.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain structs, enums, and traits
//
// Anything here can be unit tested without a backend.

// One labelled row of tabular data
pub mod sample;

// Per-epoch metrics and the accumulated training history
pub mod history;

// Core abstractions that other layers implement
pub mod traits;
