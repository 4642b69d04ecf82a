// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `evaluate`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f32, etc.)

use clap::{Args, Subcommand};
use crate::application::train_use_case::PipelineConfig;
use crate::data::fetcher::{ADULT_DATASET_URL, ADULT_FILE_NAME};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the census data, train the SDCA classifier and report test metrics
    Train(TrainArgs),

    /// Score a labelled census file with a previously trained model
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory the dataset is downloaded into (reused if already present)
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Where to fetch the adult census file from
    #[arg(long, default_value = ADULT_DATASET_URL)]
    pub url: String,

    /// Directory to save the trained model, its config and the PR curve
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.1)]
    pub test_fraction: f64,

    /// Soft threshold on the weights; larger values give a sparser model
    #[arg(long, default_value_t = 0.25)]
    pub l1_threshold: f32,

    /// L2 regularisation constant λ
    #[arg(long = "l2", default_value_t = 1e-4)]
    pub l2_regularization: f32,

    /// Maximum number of SDCA passes over the training rows
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,

    /// Seed for the split and the SDCA visiting order
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Rows scored together in one matrix product
    #[arg(long, default_value_t = 256)]
    pub batch_size: usize,

    /// Also print AUPRC, log-loss and the confusion matrix
    #[arg(long)]
    pub verbose_metrics: bool,
}

/// Convert CLI TrainArgs into the application-layer PipelineConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for PipelineConfig {
    fn from(a: TrainArgs) -> Self {
        PipelineConfig {
            data_dir:          a.data_dir,
            dataset_url:       a.url,
            dataset_file:      ADULT_FILE_NAME.to_string(),
            model_dir:         a.model_dir,
            test_fraction:     a.test_fraction,
            seed:              a.seed,
            l1_threshold:      a.l1_threshold,
            l2_regularization: a.l2_regularization,
            max_iterations:    a.iterations,
            batch_size:        a.batch_size,
            ..PipelineConfig::default()
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Census file in the same 15-column layout used for training
    #[arg(long)]
    pub data: String,

    /// Directory where `train` saved the model
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Also print AUPRC, log-loss and the confusion matrix
    #[arg(long)]
    pub verbose_metrics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_pipeline_config() {
        let cli = Cli::try_parse_from(["census-sdca", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert!(!args.verbose_metrics);

        let cfg: PipelineConfig = args.into();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_train_flags_are_forwarded() {
        let cli = Cli::try_parse_from([
            "census-sdca", "train",
            "--l1-threshold", "0.5",
            "--l2", "0.01",
            "--iterations", "7",
            "--seed", "3",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: PipelineConfig = args.into();
        assert_eq!(cfg.l1_threshold, 0.5);
        assert_eq!(cfg.l2_regularization, 0.01);
        assert_eq!(cfg.max_iterations, 7);
        assert_eq!(cfg.seed, 3);
    }

    #[test]
    fn test_evaluate_requires_data() {
        assert!(Cli::try_parse_from(["census-sdca", "evaluate"]).is_err());
    }
}
