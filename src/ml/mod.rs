// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All network definitions and optimisation code.
//
//   model.rs     — the two feed-forward networks
//                  • Classifier:    784 → 400 → 10, softmax
//                  • Discriminator: 20 → 10 → 1, sigmoid
//
//   trainer.rs   — the alternating adversarial update and
//                  the epoch loop (train, evaluate, checkpoint)
//
//   evaluator.rs — classification accuracy on the test split
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Classifier and discriminator architectures
pub mod model;

/// Adversarial training step, epoch and run loop
pub mod trainer;

/// Accuracy of the classifier on held-out data
pub mod evaluator;
