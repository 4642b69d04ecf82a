// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Training, scoring and evaluation. burn is only imported here
// (batcher.rs, scorer.rs) and in data::dataset.
//
// What's in this layer:
//
//   sdca.rs      — SDCA solver for L1/L2 logistic regression
//   model.rs     — Linear model, sigmoid, BinaryModel predictor
//   pipeline.rs  — Feature pipeline + SDCA as one estimator
//   batcher.rs   — burn Batcher: records → feature tensors
//   scorer.rs    — Batched scoring on the NdArray backend
//   evaluator.rs — Accuracy, AUC, F1, PR curve, log-loss
//
// Reference: Shalev-Shwartz & Zhang (2013) Stochastic Dual
//            Coordinate Ascent Methods for Regularized Loss
//            Minimization

pub mod sdca;

pub mod model;

pub mod pipeline;

pub mod batcher;

pub mod scorer;

pub mod evaluator;
