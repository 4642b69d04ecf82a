// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — fetch, split, fit, print test metrics
//   2. `evaluate` — reload a saved model and score a file

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, TrainArgs};

use crate::domain::metrics::{BinaryMetrics, PrCurvePoint};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "census-sdca",
    version = "0.1.0",
    about = "Train an L1-regularised SDCA classifier on the adult census data and report its metrics."
)]
pub struct Cli {
    /// The subcommand to run (train or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let verbose = args.verbose_metrics;
    tracing::info!("Starting training, data directory: {}", args.data_dir);

    let report = TrainUseCase::new(args.into()).execute()?;

    tracing::info!(
        "{} train rows, {} test rows, {} skipped, {} features",
        report.train_rows,
        report.test_rows,
        report.skipped_rows,
        report.feature_dimension
    );
    let s = &report.summary;
    tracing::info!(
        "SDCA: {} epochs, converged {}, primal {:.6}, gap {:.3e}, {} rows used, {} skipped, {} non-zero weights",
        s.epochs,
        s.converged,
        s.primal_objective,
        s.duality_gap,
        s.used_rows,
        s.skipped_rows,
        s.nonzero_weights
    );
    tracing::info!("Model written to '{}'", report.model_dir.display());
    print_report(&report.metrics, &report.pr_curve, verbose);
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let report = EvaluateUseCase::new(&args.model_dir, &args.data).execute()?;
    tracing::info!("Evaluated {} rows ({} skipped)", report.rows, report.skipped_rows);
    print_report(&report.metrics, &report.pr_curve, args.verbose_metrics);
    Ok(())
}

fn print_report(metrics: &BinaryMetrics, curve: &[PrCurvePoint], verbose: bool) {
    for line in report_lines(metrics, curve, verbose) {
        println!("{line}");
    }
}

/// The console report: scalar metrics first, then one line per PR point.
fn report_lines(metrics: &BinaryMetrics, curve: &[PrCurvePoint], verbose: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Accuracy: {}", metrics.accuracy),
        format!("AUC: {}", metrics.area_under_roc_curve),
        format!("F1 Score: {}", metrics.f1_score),
        format!("Negative Precision: {}", metrics.negative_precision),
        format!("Negative Recall: {}", metrics.negative_recall),
        format!("Positive Precision: {}", metrics.positive_precision),
        format!("Positive Recall: {}", metrics.positive_recall),
    ];

    if verbose {
        let c = &metrics.confusion;
        lines.push(format!("AUPRC: {}", metrics.area_under_pr_curve));
        lines.push(format!("Log Loss: {}", metrics.log_loss));
        lines.push(format!("Log Loss Reduction: {}", metrics.log_loss_reduction));
        lines.push(format!("Entropy: {}", metrics.entropy));
        lines.push("Confusion Matrix:".to_string());
        lines.push(format!("  TP: {}  FN: {}", c.true_positives, c.false_negatives));
        lines.push(format!("  FP: {}  TN: {}", c.false_positives, c.true_negatives));
    }

    lines.extend(curve.iter().map(|p| {
        format!(
            "Threshold: {} Precision: {} Recall: {} FPR: {}",
            p.threshold, p.precision, p.recall, p.false_positive_rate
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::ConfusionMatrix;

    fn metrics() -> BinaryMetrics {
        BinaryMetrics {
            accuracy:             0.75,
            area_under_roc_curve: 0.5,
            area_under_pr_curve:  0.6,
            f1_score:             0.8,
            positive_precision:   1.0,
            positive_recall:      0.25,
            negative_precision:   0.5,
            negative_recall:      0.125,
            log_loss:             0.9,
            log_loss_reduction:   0.1,
            entropy:              1.0,
            confusion:            ConfusionMatrix::default(),
        }
    }

    #[test]
    fn test_report_order() {
        let curve = vec![PrCurvePoint {
            threshold:           1.5,
            precision:           1.0,
            recall:              0.5,
            false_positive_rate: 0.0,
        }];
        let lines = report_lines(&metrics(), &curve, false);
        assert_eq!(
            lines,
            vec![
                "Accuracy: 0.75",
                "AUC: 0.5",
                "F1 Score: 0.8",
                "Negative Precision: 0.5",
                "Negative Recall: 0.125",
                "Positive Precision: 1",
                "Positive Recall: 0.25",
                "Threshold: 1.5 Precision: 1 Recall: 0.5 FPR: 0",
            ]
        );
    }

    #[test]
    fn test_verbose_adds_confusion_matrix() {
        let lines = report_lines(&metrics(), &[], true);
        assert!(lines.iter().any(|l| l.starts_with("AUPRC: ")));
        assert!(lines.iter().any(|l| l == "Confusion Matrix:"));
        assert_eq!(lines[0], "Accuracy: 0.75");
    }
}
