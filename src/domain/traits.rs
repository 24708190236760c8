// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks for digits through this trait
// and never learns where they come from. MnistLoader goes
// through burn's MNIST dataset; tests substitute an in-memory source.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::mode::Split;
use crate::domain::sample::DigitSample;

// ─── DigitSource ──────────────────────────────────────────────────────────────
/// Any component that can produce labelled digit images.
///
/// Implementations:
///   - MnistLoader → burn's downloaded, cached MnistDataset
pub trait DigitSource {
    /// Load every sample of the requested split, in file order.
    fn load_split(&self, split: Split) -> Result<Vec<DigitSample>>;
}
