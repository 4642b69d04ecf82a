// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the remote census file to in-memory rows:
//
//   remote adult.train
//       │
//       ▼
//   DatasetFetcher    → downloads once, reuses the local copy
//       │
//       ▼
//   TextLoader        → parses the 15 typed columns
//       │
//       ▼
//   train_test_split  → seeded 90/10 shuffle split
//       │
//       ▼
//   CensusDataset     → implements burn's Dataset trait
//
// Each module is responsible for exactly one step.

/// Downloads the dataset if it is not on disk yet
pub mod fetcher;

/// Parses the comma-separated census file
pub mod loader;

/// Implements burn's Dataset trait for census rows
pub mod dataset;

/// Shuffles and splits rows into train/test sets
pub mod splitter;
