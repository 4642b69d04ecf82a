// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Fetch the dataset              (Layer 4 - data)
//   Step 2: Load it with the census schema (Layer 4 - data)
//   Step 3: Split train/test 90/10         (Layer 4 - data)
//   Step 4: Build the estimator pipeline   (Layer 5 - features + ml)
//   Step 5: Fit it on the training split   (Layer 5 - ml)
//   Step 6: Score the test split           (Layer 5 - ml)
//   Step 7: Evaluate with PR curve         (Layer 5 - ml)
//   Step 8: Save model, config, PR curve   (Layer 6 - infra)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    dataset::CensusDataset,
    fetcher::{DatasetFetcher, ADULT_DATASET_URL, ADULT_FILE_NAME},
    loader::TextLoader,
    splitter::train_test_split,
};
use crate::domain::metrics::{BinaryMetrics, PrCurvePoint};
use crate::domain::traits::Estimator;
use crate::features::FeaturePipeline;
use crate::infra::{metrics::PrCurveWriter, model_store::ModelStore};
use crate::ml::{
    evaluator::evaluate_with_pr_curve,
    pipeline::BinaryPipeline,
    scorer::BatchScorer,
    sdca::{SdcaOptions, SdcaTrainer, TrainingSummary},
};

const TOP_WEIGHTS_LOGGED: usize = 5;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every path and hyperparameter of a run. Saved next to the
// model so a later `evaluate` knows how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub data_dir:                 String,
    pub dataset_url:              String,
    pub dataset_file:             String,
    pub model_dir:                String,
    pub test_fraction:            f64,
    pub seed:                     u64,
    pub l1_threshold:             f32,
    pub l2_regularization:        f32,
    pub max_iterations:           usize,
    pub convergence_tolerance:    f64,
    pub native_country_min_count: usize,
    pub batch_size:               usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir:                 "data".to_string(),
            dataset_url:              ADULT_DATASET_URL.to_string(),
            dataset_file:             ADULT_FILE_NAME.to_string(),
            model_dir:                "model".to_string(),
            test_fraction:            0.1,
            seed:                     42,
            l1_threshold:             0.25,
            l2_regularization:        1e-4,
            max_iterations:           100,
            convergence_tolerance:    0.1,
            native_country_min_count: 10,
            batch_size:               256,
        }
    }
}

impl PipelineConfig {
    pub fn sdca_options(&self) -> SdcaOptions {
        SdcaOptions {
            l1_threshold:          self.l1_threshold,
            l2_regularization:     self.l2_regularization,
            max_iterations:        self.max_iterations,
            convergence_tolerance: self.convergence_tolerance,
            shuffle:               true,
            seed:                  self.seed,
        }
    }
}

/// Everything the CLI prints after a training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub metrics:           BinaryMetrics,
    pub pr_curve:          Vec<PrCurvePoint>,
    pub summary:           TrainingSummary,
    pub train_rows:        usize,
    pub test_rows:         usize,
    pub skipped_rows:      usize,
    pub feature_dimension: usize,
    pub model_dir:         PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: PipelineConfig,
}

impl TrainUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Fetch ─────────────────────────────────────────────────────
        let fetcher   = DatasetFetcher::new(&cfg.dataset_url, &cfg.data_dir, &cfg.dataset_file);
        let data_path = fetcher.ensure_local()?;

        // ── Step 2: Load ──────────────────────────────────────────────────────
        let loaded = TextLoader::new(&data_path).load()?;
        if loaded.records.is_empty() {
            bail!("No rows could be loaded from '{}'", data_path.display());
        }

        // ── Step 3: Split ─────────────────────────────────────────────────────
        let (train, test) = train_test_split(loaded.records, cfg.test_fraction, cfg.seed);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());
        if test.is_empty() {
            bail!("Test split is empty; increase --test-fraction");
        }

        // ── Step 4: Build the estimator ───────────────────────────────────────
        let pipeline = BinaryPipeline::new(
            FeaturePipeline::census(cfg.native_country_min_count),
            SdcaTrainer::new(cfg.sdca_options()),
        );

        // ── Step 5: Fit ───────────────────────────────────────────────────────
        let trained = pipeline.fit(&train)?;
        let feature_dimension = trained.model.featurizer.dimension();

        let mut ranked: Vec<(String, f32)> = trained
            .model
            .featurizer
            .slot_names()
            .into_iter()
            .zip(trained.model.linear.weights.iter().copied())
            .filter(|(_, w)| *w != 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        for (name, w) in ranked.iter().take(TOP_WEIGHTS_LOGGED) {
            tracing::info!("Weight {:+.4} on '{}'", w, name);
        }

        // ── Step 6: Score the held-out rows ───────────────────────────────────
        let test_rows = test.len();
        let scored = BatchScorer::new(cfg.batch_size)
            .score(&trained.model, CensusDataset::new(test))?;

        // ── Step 7: Evaluate ──────────────────────────────────────────────────
        let (metrics, pr_curve) = evaluate_with_pr_curve(&scored)?;
        tracing::info!(
            "Test accuracy {:.4}, AUC {:.4}",
            metrics.accuracy,
            metrics.area_under_roc_curve
        );

        // ── Step 8: Persist ───────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.model_dir);
        store.save_model(&trained.model)?;
        store.save_config(cfg)?;
        PrCurveWriter::new(&cfg.model_dir).write(&pr_curve)?;
        tracing::info!("Model saved to '{}'", cfg.model_dir);

        Ok(TrainReport {
            metrics,
            pr_curve,
            summary: trained.summary,
            train_rows: train.len(),
            test_rows,
            skipped_rows: loaded.skipped,
            feature_dimension,
            model_dir: store.dir().clone(),
        })
    }
}
