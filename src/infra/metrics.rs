// ============================================================
// Layer 6 — PR Curve Writer
// ============================================================
// Writes the precision/recall curve of an evaluation run to
// <dir>/pr_curve.csv so it can be plotted later.
//
// Example CSV output:
//   threshold,precision,recall,false_positive_rate
//   3.412000,1.000000,0.001631,0.000000
//   3.391000,1.000000,0.003263,0.000000
//   ...
//
// The file is rewritten on every run.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::domain::metrics::PrCurvePoint;

pub struct PrCurveWriter {
    csv_path: PathBuf,
}

impl PrCurveWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { csv_path: dir.into().join("pr_curve.csv") }
    }

    pub fn write(&self, curve: &[PrCurvePoint]) -> Result<()> {
        if let Some(parent) = self.csv_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.csv_path)
            .with_context(|| format!("Cannot write '{}'", self.csv_path.display()))?;
        let mut f = BufWriter::new(file);

        writeln!(f, "threshold,precision,recall,false_positive_rate")?;
        for p in curve {
            writeln!(
                f,
                "{},{},{},{}",
                p.threshold, p.precision, p.recall, p.false_positive_rate,
            )?;
        }
        f.flush()?;

        tracing::debug!("Wrote {} PR points to '{}'", curve.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
