// ============================================================
// Layer 5 — Batched Scorer
// ============================================================
// Scores a whole CensusDataset with burn on the CPU (NdArray
// backend):
//
//   DataLoader ──► FeatureBatch [N, D]
//                      │  matmul
//                      ▼
//              weights [D, 1]  + bias  ──► scores [N, 1]
//
// Batches come back in dataset order, so the returned
// ScoredExamples line up with the input rows.

use anyhow::{anyhow, bail, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    data::dataloader::DataLoaderBuilder,
    tensor::{Tensor, TensorData},
};
use std::sync::Arc;

use crate::data::dataset::CensusDataset;
use crate::domain::metrics::ScoredExample;
use crate::ml::batcher::FeatureBatcher;
use crate::ml::model::{sigmoid, BinaryModel};

type ScoringBackend = NdArray<f32>;

pub struct BatchScorer {
    batch_size: usize,
}

impl BatchScorer {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size: batch_size.max(1) }
    }

    pub fn score(&self, model: &BinaryModel, dataset: CensusDataset) -> Result<Vec<ScoredExample>> {
        let dimension = model.featurizer.dimension();
        if model.linear.weights.len() != dimension {
            bail!(
                "Model has {} weights but the featurizer produces {} features",
                model.linear.weights.len(),
                dimension
            );
        }

        let device  = NdArrayDevice::default();
        let batcher = FeatureBatcher::<ScoringBackend>::new(
            Arc::new(model.featurizer.clone()),
            device.clone(),
        );
        let loader = DataLoaderBuilder::new(batcher)
            .batch_size(self.batch_size)
            .build(dataset);

        let weights = Tensor::<ScoringBackend, 2>::from_data(
            TensorData::new(model.linear.weights.clone(), [dimension, 1]),
            &device,
        );

        let mut scored = Vec::new();
        for batch in loader.iter() {
            let scores = batch
                .features
                .matmul(weights.clone())
                .add_scalar(model.linear.bias);
            let values = scores
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| anyhow!("Cannot read scores back from tensor: {e:?}"))?;

            scored.extend(batch.labels.into_iter().zip(values).map(|(label, score)| {
                ScoredExample { label, score, probability: sigmoid(score) }
            }));
        }

        tracing::debug!("Scored {} examples", scored.len());
        Ok(scored)
    }
}
