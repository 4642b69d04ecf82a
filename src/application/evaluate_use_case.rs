// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Reloads a model written by `train` and scores a labelled
// census file with it:
//
//   Step 1: Load model + pipeline config (Layer 6 - infra)
//   Step 2: Load the file                (Layer 4 - data)
//   Step 3: Score every row              (Layer 5 - ml)
//   Step 4: Evaluate with PR curve       (Layer 5 - ml)

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::data::{dataset::CensusDataset, loader::TextLoader};
use crate::domain::metrics::{BinaryMetrics, PrCurvePoint};
use crate::infra::model_store::ModelStore;
use crate::ml::{evaluator::evaluate_with_pr_curve, scorer::BatchScorer};

#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub metrics:      BinaryMetrics,
    pub pr_curve:     Vec<PrCurvePoint>,
    pub rows:         usize,
    pub skipped_rows: usize,
}

pub struct EvaluateUseCase {
    store:     ModelStore,
    data_path: PathBuf,
}

impl EvaluateUseCase {
    pub fn new(model_dir: impl Into<PathBuf>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            store:     ModelStore::new(model_dir),
            data_path: data_path.into(),
        }
    }

    pub fn execute(&self) -> Result<EvaluationReport> {
        // ── Step 1: Model ─────────────────────────────────────────────────────
        let model  = self.store.load_model()?;
        let config = self.store.load_config()?;
        tracing::info!(
            "Loaded model with {} features from '{}'",
            model.featurizer.dimension(),
            self.store.dir().display()
        );

        // ── Step 2: Data ──────────────────────────────────────────────────────
        let loaded = TextLoader::new(&self.data_path).load()?;
        if loaded.records.is_empty() {
            bail!("No rows could be loaded from '{}'", self.data_path.display());
        }
        let rows = loaded.records.len();

        // ── Step 3 + 4: Score and evaluate ────────────────────────────────────
        let scored = BatchScorer::new(config.batch_size)
            .score(&model, CensusDataset::new(loaded.records))?;
        let (metrics, pr_curve) = evaluate_with_pr_curve(&scored)?;

        Ok(EvaluationReport {
            metrics,
            pr_curve,
            rows,
            skipped_rows: loaded.skipped,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::write_synthetic_census;
    use crate::application::train_use_case::{PipelineConfig, TrainUseCase};

    #[test]
    fn test_evaluates_a_saved_model() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("adult.txt");
        let model_dir = dir.path().join("model");
        write_synthetic_census(&data_file, 200);

        let cfg = PipelineConfig {
            data_dir:          dir.path().to_string_lossy().into_owned(),
            dataset_url:       "http://127.0.0.1:9/adult.train".to_string(),
            model_dir:         model_dir.to_string_lossy().into_owned(),
            l2_regularization: 1e-2,
            ..PipelineConfig::default()
        };
        TrainUseCase::new(cfg).execute().unwrap();

        let report = EvaluateUseCase::new(&model_dir, &data_file).execute().unwrap();
        assert_eq!(report.rows, 200);
        assert_eq!(report.skipped_rows, 0);
        assert!(report.metrics.accuracy >= 0.9);
        assert_eq!(report.metrics.confusion.total(), 200);
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("adult.txt");
        write_synthetic_census(&data_file, 10);

        let err = EvaluateUseCase::new(dir.path().join("nope"), &data_file)
            .execute()
            .unwrap_err();
        assert!(err.to_string().contains("train"));
    }
}
