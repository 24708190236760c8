// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the MNIST download to device-ready batches.
//
//   burn MnistDataset (downloaded + cached by burn)
//       │
//       ▼
//   MnistLoader    → flattens images, scales pixels
//       │
//       ▼
//   DigitDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   DigitBatcher   → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader     → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the train / test split through burn's MNIST dataset
pub mod loader;

/// Implements Burn's Dataset trait for digit samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
