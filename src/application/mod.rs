// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: resolve the configuration,
// load the data the mode needs, hand off to the ML layer.
// No tensor code and no printing here.

// The train / eval / train-eval workflow
pub mod run_use_case;
