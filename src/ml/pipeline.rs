// ============================================================
// Layer 5 — Binary Classification Pipeline
// ============================================================
// Chains the feature pipeline and the SDCA trainer into one
// estimator:
//
//   records ─► FeaturePipeline.fit ─► FittedFeaturizer
//          └─► transform each row  ─► SdcaTrainer.fit ─► weights
//
// The result is a BinaryModel that scores raw records.

use anyhow::Result;

use crate::domain::record::CensusRecord;
use crate::domain::traits::Estimator;
use crate::features::FeaturePipeline;
use crate::ml::model::BinaryModel;
use crate::ml::sdca::{LabeledVector, SdcaTrainer, TrainingSummary};

pub struct BinaryPipeline {
    features: FeaturePipeline,
    trainer:  SdcaTrainer,
}

/// A fitted pipeline plus what the trainer reported.
#[derive(Debug, Clone)]
pub struct TrainedPipeline {
    pub model:   BinaryModel,
    pub summary: TrainingSummary,
}

impl BinaryPipeline {
    pub fn new(features: FeaturePipeline, trainer: SdcaTrainer) -> Self {
        Self { features, trainer }
    }
}

impl Estimator<CensusRecord> for BinaryPipeline {
    type Fitted = TrainedPipeline;

    fn fit(&self, rows: &[CensusRecord]) -> Result<TrainedPipeline> {
        let featurizer = self.features.fit(rows)?;

        let training: Vec<LabeledVector> = rows
            .iter()
            .map(|r| LabeledVector::new(featurizer.transform(r), r.label()))
            .collect();

        tracing::info!(
            "Training SDCA on {} rows x {} features",
            training.len(),
            featurizer.dimension()
        );
        let fit = self.trainer.fit(&training)?;

        Ok(TrainedPipeline {
            model:   BinaryModel { featurizer, linear: fit.model },
            summary: fit.summary,
        })
    }
}
