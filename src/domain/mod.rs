// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the pipeline.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or ML-specific code
//   - Only plain Rust structs, enums, and traits
//
// This keeps the domain unit-testable without a GPU and free
// of framework noise.

// News records at each stage of the pipeline
pub mod record;

// 1-based class index ↔ 0-based label mapping
pub mod labels;

// The pipeline error taxonomy
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
