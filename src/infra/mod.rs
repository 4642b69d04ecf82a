// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one layer:
//
//   http.rs        — Shared ureq agent with timeouts and a
//                    size-capped body copy, used by the dataset
//                    fetcher.
//
//   model_store.rs — Saves/loads the fitted BinaryModel and the
//                    PipelineConfig as JSON so `evaluate` can
//                    reuse a model trained earlier.
//
//   metrics.rs     — Writes the PR curve of a run to CSV.

pub mod http;

pub mod model_store;

pub mod metrics;
