// ============================================================
// Layer 3 — Operating Mode and Dataset Split
// ============================================================
// Plain enums shared by the CLI, the application layer and
// the data loader. The CLI has its own clap-facing copy of
// Mode so clap never leaks into this layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a run does each epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Adversarial training only
    Train,
    /// Accuracy on the test split only — requires a checkpoint
    Eval,
    /// Train, then evaluate, every epoch
    TrainEval,
}

impl Mode {
    pub fn trains(self) -> bool {
        matches!(self, Mode::Train | Mode::TrainEval)
    }

    pub fn evaluates(self) -> bool {
        matches!(self, Mode::Eval | Mode::TrainEval)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Train     => "train",
            Mode::Eval      => "eval",
            Mode::TrainEval => "train-eval",
        };
        f.write_str(s)
    }
}

/// Which half of MNIST to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// 60,000 training images
    Train,
    /// 10,000 test images
    Test,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_phases() {
        assert!(Mode::Train.trains() && !Mode::Train.evaluates());
        assert!(!Mode::Eval.trains() && Mode::Eval.evaluates());
        assert!(Mode::TrainEval.trains() && Mode::TrainEval.evaluates());
    }

    #[test]
    fn test_mode_serialises_kebab_case() {
        let json = serde_json::to_string(&Mode::TrainEval).unwrap();
        assert_eq!(json, "\"train-eval\"");
        assert_eq!(Mode::TrainEval.to_string(), "train-eval");
    }
}
