// ============================================================
// Layer 5 — Prediction Report
// ============================================================
// Records the scored test set to a CSV file after a run.
//
// Why log predictions to CSV?
//   - Easy to open in a spreadsheet next to the source data
//   - Lets you plot predicted vs actual to judge the model
//   - Provides a permanent record of each run
//
// Columns per scored row:
//   - actual:    the true ring count from the test set
//   - predicted: what the endpoint returned for the row
//   - abs_error: |actual - predicted|
//
// Output file: <output_dir>/predictions.csv
//
// The aggregate number reported alongside is the mean absolute
// error in rings. Since ring count ≈ age in years (+1.5), the
// MAE reads directly as "how many years off, on average".
//
// Reference: Rust Book §9 (Error Handling)
//            csv crate documentation

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::record::ScoredRow;

/// Writes the per-row prediction report for one run.
pub struct PredictionReport {
    csv_path: PathBuf,
}

impl PredictionReport {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self { csv_path: output_dir.as_ref().join("predictions.csv") }
    }

    /// Write all scored rows, header first. Overwrites any
    /// report from a previous run in the same directory.
    pub fn write(&self, scored: &[ScoredRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;

        writer.write_record(["actual", "predicted", "abs_error"])?;

        for s in scored {
            writer.write_record([
                s.row.rings.to_string(),
                s.predicted.to_string(),
                s.abs_error().to_string(),
            ])?;
        }

        writer.flush()?;
        tracing::info!("Wrote {} prediction(s) to '{}'", scored.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

/// Mean absolute error over the scored rows, in rings.
/// Returns 0.0 for an empty slice rather than dividing by zero.
pub fn mean_abs_error(scored: &[ScoredRow]) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }
    scored.iter().map(ScoredRow::abs_error).sum::<f64>() / scored.len() as f64
}
