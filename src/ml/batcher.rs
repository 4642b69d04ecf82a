// ============================================================
// Layer 5 — Feature Batcher
// ============================================================
// Implements burn's Batcher trait: turns a Vec<CensusRecord>
// into one [batch_size, dimension] float tensor.
//
// Every record goes through the fitted featurizer, the vectors
// are flattened row-major and reshaped:
//   [r1_f1, r1_f2, ..., r1_fD, r2_f1, ..., rN_fD] → [N, D]
//
// Labels stay on the host; the evaluator needs them next to the
// scores, not on the device.

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Tensor, TensorData},
};
use std::sync::Arc;

use crate::domain::record::CensusRecord;
use crate::features::FittedFeaturizer;

#[derive(Debug, Clone)]
pub struct FeatureBatch<B: Backend> {
    /// Shape: [batch_size, dimension]
    pub features: Tensor<B, 2>,

    /// One entry per row of `features`
    pub labels: Vec<Option<bool>>,
}

#[derive(Clone, Debug)]
pub struct FeatureBatcher<B: Backend> {
    featurizer: Arc<FittedFeaturizer>,
    device:     B::Device,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(featurizer: Arc<FittedFeaturizer>, device: B::Device) -> Self {
        Self { featurizer, device }
    }
}

impl<B: Backend> Batcher<CensusRecord, FeatureBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<CensusRecord>) -> FeatureBatch<B> {
        let batch_size = items.len();
        let dimension  = self.featurizer.dimension();

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|r| self.featurizer.transform(r))
            .collect();
        let labels = items.iter().map(CensusRecord::label).collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(flat, [batch_size, dimension]),
            &self.device,
        );

        FeatureBatch { features, labels }
    }
}
