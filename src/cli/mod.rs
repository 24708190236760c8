// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands the resulting
// RunConfig to Layer 2. All work is delegated; this layer
// only routes and reports.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::RunArgs;

/// Train a dense MNIST classifier against a class-pair discriminator,
/// or evaluate a saved one.
#[derive(Parser, Debug)]
#[command(
    name = "digit-gan",
    version = "0.1.0",
    about = "Adversarially train a dense MNIST classifier, then report its accuracy."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: RunArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        use crate::application::run_use_case::RunUseCase;

        let use_case = RunUseCase::new(self.args.into())?;
        let cfg      = use_case.config();
        tracing::info!(
            "Mode '{}': {} epoch(s), batch size {}, seed {}",
            cfg.mode, cfg.epochs, cfg.batch_size, cfg.seed,
        );

        let summary = use_case.execute()?;

        if let Some(acc) = summary.last_accuracy {
            println!("Final accuracy: {:.2}% ({}/{})", acc.ratio() * 100.0, acc.correct, acc.total);
        }
        if let Some(path) = summary.checkpoints.last() {
            println!("Last checkpoint: {}", path.display());
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::run_use_case::RunConfig;
    use crate::domain::mode::Mode;

    #[test]
    fn test_defaults_match_run_config() {
        let cli = Cli::try_parse_from(["digit-gan"]).unwrap();
        assert_eq!(RunConfig::from(cli.args), RunConfig::default());
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "digit-gan",
            "--mode", "eval",
            "--load-model", "dense_mnist_10",
            "--batch-size", "128",
            "--save-interval", "5",
        ])
        .unwrap();
        let cfg = RunConfig::from(cli.args);

        assert_eq!(cfg.mode, Mode::Eval);
        assert_eq!(cfg.load_model.as_deref(), Some("dense_mnist_10"));
        assert_eq!(cfg.batch_size, 128);
        assert_eq!(cfg.save_interval, 5);
    }

    #[test]
    fn test_train_eval_spelling_and_unknown_mode() {
        let cli = Cli::try_parse_from(["digit-gan", "--mode", "train-eval"]).unwrap();
        assert_eq!(Mode::from(cli.args.mode), Mode::TrainEval);
        assert!(Cli::try_parse_from(["digit-gan", "--mode", "test"]).is_err());
    }

    #[test]
    fn test_clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
