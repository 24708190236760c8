// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing what the
// program works with: labelled digit images, the dataset
// split to read, and the run mode.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A labelled 28x28 digit image
pub mod sample;

// Run mode (train / eval / train-eval) and dataset split
pub mod mode;

// Core abstractions (traits) that other layers implement
pub mod traits;
