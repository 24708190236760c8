// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files written alongside a run, all named from the
// --save-model prefix:
//
//   checkpoint.rs — classifier weights via Burn's
//                   CompactRecorder, plus the resolved run
//                   config as JSON
//
//   metrics.rs    — per-epoch losses and accuracy appended
//                   to a CSV file
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Classifier checkpoint saving and loading
pub mod checkpoint;

/// Per-epoch metrics CSV logger
pub mod metrics;
