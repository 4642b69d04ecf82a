// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that describe the
// census classification problem.
//
// Rules for this layer:
//   - NO burn types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Think of this layer as the "dictionary" of the system —
// it defines what a record, a column and a metrics report ARE,
// not how they are produced.

// The 15-column census schema and one loaded row
pub mod record;

// Evaluation results: scalar metrics, confusion matrix, PR curve
pub mod metrics;

// Core abstractions (traits) that other layers implement
pub mod traits;
