// ============================================================
// Layer 3 — Evaluation Result Types
// ============================================================
// What the evaluator produces for a scored test set:
//
//   BinaryMetrics   — scalar figures (accuracy, AUC, F1, ...)
//   ConfusionMatrix — raw counts at the default threshold
//   PrCurvePoint    — one (threshold, precision, recall, FPR)
//                     tuple per distinct score
//
// The values themselves are computed in ml::evaluator.

use serde::{Deserialize, Serialize};

/// One test example after the model has scored it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredExample {
    /// Ground-truth label; None when the file had no label
    pub label: Option<bool>,

    /// Raw linear score w·x + b
    pub score: f32,

    /// Calibrated probability of the positive class
    pub probability: f32,
}

/// Counts at the default decision threshold (score > 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives:  usize,
    pub false_positives: usize,
    pub true_negatives:  usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn positives(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn negatives(&self) -> usize {
        self.true_negatives + self.false_positives
    }
}

/// Scalar metrics for a binary classifier on a test set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryMetrics {
    pub accuracy:             f64,
    pub area_under_roc_curve: f64,
    pub area_under_pr_curve:  f64,
    pub f1_score:             f64,
    pub positive_precision:   f64,
    pub positive_recall:      f64,
    pub negative_precision:   f64,
    pub negative_recall:      f64,

    /// Mean base-2 log-loss of the calibrated probabilities
    pub log_loss:             f64,

    /// Relative improvement of log_loss over the label prior
    pub log_loss_reduction:   f64,

    /// Base-2 entropy of the test-set label prior
    pub entropy:              f64,

    pub confusion:            ConfusionMatrix,
}

/// One point of the precision/recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrCurvePoint {
    /// Examples with score >= threshold are predicted positive
    pub threshold:           f32,
    pub precision:           f64,
    pub recall:              f64,
    pub false_positive_rate: f64,
}
