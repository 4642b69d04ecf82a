// ============================================================
// Layer 5 — Linear Binary Model
// ============================================================
// The fitted artifact:
//
//   score       = w · x + b
//   probability = σ(score)      (logistic loss is calibrated)
//   label       = score > 0
//
// BinaryModel bundles the fitted featurizer with the linear
// weights so a raw CensusRecord can be scored directly, and so
// the whole thing round-trips through serde_json.

use serde::{Deserialize, Serialize};

use crate::domain::record::CensusRecord;
use crate::domain::traits::Predictor;
use crate::features::FittedFeaturizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearBinaryModel {
    pub weights: Vec<f32>,
    pub bias:    f32,
}

impl LinearBinaryModel {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    pub fn score(&self, features: &[f32]) -> f32 {
        let dot: f32 = self.weights.iter().zip(features).map(|(w, x)| w * x).sum();
        dot + self.bias
    }

    /// Number of weights the L1 threshold left non-zero
    pub fn nonzero_weights(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }
}

pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Output of the model for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub score:           f32,
    pub probability:     f32,
    pub predicted_label: bool,
}

impl Prediction {
    pub fn from_score(score: f32) -> Self {
        Self {
            score,
            probability:     sigmoid(score),
            predicted_label: score > 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryModel {
    pub featurizer: FittedFeaturizer,
    pub linear:     LinearBinaryModel,
}

impl Predictor for BinaryModel {
    type Output = Prediction;

    fn predict(&self, record: &CensusRecord) -> Prediction {
        let features = self.featurizer.transform(record);
        Prediction::from_score(self.linear.score(&features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_dot_plus_bias() {
        let m = LinearBinaryModel::new(vec![2.0, -1.0, 0.0], 0.5);
        assert_eq!(m.score(&[1.0, 3.0, 7.0]), -0.5);
        assert_eq!(m.nonzero_weights(), 2);
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(100.0) > 0.999);
        assert!(sigmoid(-100.0) >= 0.0 && sigmoid(-100.0) < 1e-6);
    }

    #[test]
    fn test_prediction_threshold_at_zero() {
        assert!(!Prediction::from_score(0.0).predicted_label);
        assert!(Prediction::from_score(0.01).predicted_label);
        assert!(Prediction::from_score(-3.0).probability < 0.5);
    }
}
