// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline is assembled from three kinds of pieces:
//
//   RecordSource — anything that yields census records
//   Estimator    — something that learns from data and
//                  returns a fitted artifact
//   Predictor    — a fitted artifact that scores one record
//
// The application layer only talks to these traits, so the
// feature pipeline, the SDCA trainer and the composed
// pipeline are interchangeable at the seams.

use anyhow::Result;

use crate::domain::record::CensusRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load census records.
///
/// Implementations:
///   - TextLoader → reads a comma-separated file with a header row
pub trait RecordSource {
    fn load_all(&self) -> Result<Vec<CensusRecord>>;
}

// ─── Estimator ────────────────────────────────────────────────────────────────
/// Learns from a slice of training data.
///
/// Implementations:
///   - FeaturePipeline → FittedFeaturizer
///   - SdcaTrainer     → SdcaFit
///   - BinaryPipeline  → TrainedPipeline
pub trait Estimator<T> {
    type Fitted;

    fn fit(&self, data: &[T]) -> Result<Self::Fitted>;
}

// ─── Predictor ────────────────────────────────────────────────────────────────
/// Produces a prediction for a single record.
pub trait Predictor {
    type Output;

    fn predict(&self, record: &CensusRecord) -> Self::Output;
}
