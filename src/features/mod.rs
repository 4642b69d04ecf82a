// ============================================================
// Layer 5 — Feature Pipeline
// ============================================================
// A fluent builder that describes how a CensusRecord becomes a
// dense feature vector:
//
//   FeaturePipeline::new()
//       .numeric(Column::Age)
//       .one_hot(Column::Sex)
//       .one_hot_min_count(Column::NativeCountry, 10)
//       .normalize()
//
// Every step appends slots to the same vector, so the steps
// are concatenated in the order they were added. `fit` learns
// the category vocabularies and normalization scales from the
// training rows and returns a FittedFeaturizer, which is plain
// data (serializable with the model).

pub mod normalizer;
pub mod one_hot;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::record::{CensusRecord, Column, ColumnKind};
use crate::domain::traits::Estimator;
use normalizer::MinMaxNormalizer;
use one_hot::OneHotEncoder;

/// One unfitted step of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureStep {
    /// Copy a numeric column into one slot
    Numeric(Column),

    /// One-hot encode a text column, keeping categories seen at
    /// least `min_count` times
    OneHot { column: Column, min_count: usize },
}

#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    steps:     Vec<FeatureStep>,
    normalize: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pipeline used for the adult census classifier.
    /// Native country is sparse, so rare countries are dropped.
    pub fn census(native_country_min_count: usize) -> Self {
        Self::new()
            .numeric(Column::Age)
            .numeric(Column::EducationNum)
            .one_hot(Column::MaritalStatus)
            .one_hot(Column::Occupation)
            .one_hot(Column::Relationship)
            .one_hot(Column::Ethnicity)
            .one_hot(Column::Sex)
            .numeric(Column::HoursPerWeek)
            .one_hot_min_count(Column::NativeCountry, native_country_min_count)
            .normalize()
    }

    pub fn numeric(mut self, column: Column) -> Self {
        self.steps.push(FeatureStep::Numeric(column));
        self
    }

    pub fn one_hot(self, column: Column) -> Self {
        self.one_hot_min_count(column, 1)
    }

    pub fn one_hot_min_count(mut self, column: Column, min_count: usize) -> Self {
        self.steps.push(FeatureStep::OneHot { column, min_count });
        self
    }

    pub fn normalize(mut self) -> Self {
        self.normalize = true;
        self
    }

    pub fn steps(&self) -> &[FeatureStep] {
        &self.steps
    }
}

impl Estimator<CensusRecord> for FeaturePipeline {
    type Fitted = FittedFeaturizer;

    fn fit(&self, rows: &[CensusRecord]) -> Result<FittedFeaturizer> {
        if self.steps.is_empty() {
            bail!("Feature pipeline has no steps");
        }

        let mut blocks = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let block = match *step {
                FeatureStep::Numeric(column) => {
                    if column.kind() != ColumnKind::Numeric {
                        bail!("Column '{}' is not numeric", column.name());
                    }
                    FittedBlock::Numeric { column }
                }
                FeatureStep::OneHot { column, min_count } => {
                    if column.kind() != ColumnKind::Text {
                        bail!("Column '{}' is not a text column", column.name());
                    }
                    let values  = rows.iter().filter_map(|r| r.text(column));
                    let encoder = OneHotEncoder::fit_min_count(values, min_count);
                    tracing::debug!(
                        "One-hot '{}': {} slots (min count {})",
                        column.name(),
                        encoder.dimension(),
                        min_count
                    );
                    FittedBlock::OneHot { column, encoder }
                }
            };
            blocks.push(block);
        }

        let mut fitted = FittedFeaturizer { blocks, normalizer: None };
        if fitted.dimension() == 0 {
            bail!("Feature pipeline produced no features");
        }

        if self.normalize {
            let raw: Vec<Vec<f32>> = rows.iter().map(|r| fitted.transform_raw(r)).collect();
            fitted.normalizer = Some(MinMaxNormalizer::fit(&raw, fitted.dimension()));
        }

        tracing::info!("Feature pipeline fitted: {} slots", fitted.dimension());
        Ok(fitted)
    }
}

/// One fitted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedBlock {
    Numeric { column: Column },
    OneHot { column: Column, encoder: OneHotEncoder },
}

impl FittedBlock {
    fn dimension(&self) -> usize {
        match self {
            FittedBlock::Numeric { .. } => 1,
            FittedBlock::OneHot { encoder, .. } => encoder.dimension(),
        }
    }
}

/// The fitted feature pipeline: turns a record into its feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedFeaturizer {
    blocks:     Vec<FittedBlock>,
    normalizer: Option<MinMaxNormalizer>,
}

impl FittedFeaturizer {
    pub fn dimension(&self) -> usize {
        self.blocks.iter().map(FittedBlock::dimension).sum()
    }

    pub fn transform(&self, record: &CensusRecord) -> Vec<f32> {
        let mut v = self.transform_raw(record);
        if let Some(norm) = &self.normalizer {
            norm.apply(&mut v);
        }
        v
    }

    /// Human-readable name of every slot, e.g. `sex=Female`.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.dimension());
        for block in &self.blocks {
            match block {
                FittedBlock::Numeric { column } => names.push(column.name().to_string()),
                FittedBlock::OneHot { column, encoder } => names.extend(
                    encoder
                        .categories()
                        .iter()
                        .map(|c| format!("{}={}", column.name(), c)),
                ),
            }
        }
        names
    }

    fn transform_raw(&self, record: &CensusRecord) -> Vec<f32> {
        let mut v = Vec::with_capacity(self.dimension());
        for block in &self.blocks {
            match block {
                FittedBlock::Numeric { column } => {
                    v.push(record.numeric(*column).unwrap_or(f32::NAN));
                }
                FittedBlock::OneHot { column, encoder } => {
                    encoder.encode_into(record.text(*column).unwrap_or(""), &mut v);
                }
            }
        }
        v
    }
}
