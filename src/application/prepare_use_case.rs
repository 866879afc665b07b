// ============================================================
// Layer 2 — Prepare Use Case
// ============================================================
// The local half of the pipeline, with nothing remote:
//
//   download → transform → split → encode → export to disk
//
// Produces train.csv, validation.csv and test.csv in the output
// directory — exactly the bytes a full run would stage, so you
// can inspect what the platform would receive before spending
// money on a training job. All three files use the labelled
// (training) form; the label-less inference form is only ever
// built at invoke time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::{
    encoder, loader,
    splitter::{split_three, SplitFractions},
    transformer,
};
use crate::domain::record::RawRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub source_url: String,
    pub output_dir: String,

    pub train_fraction:      f64,
    pub validation_fraction: f64,
    pub test_fraction:       f64,
    pub seed:                u64,
}

impl PrepareConfig {
    fn fractions(&self) -> SplitFractions {
        SplitFractions {
            train:      self.train_fraction,
            validation: self.validation_fraction,
            test:       self.test_fraction,
        }
    }
}

/// Paths and row counts of the exported files.
#[derive(Debug)]
pub struct PrepareSummary {
    pub train_path:      PathBuf,
    pub validation_path: PathBuf,
    pub test_path:       PathBuf,
    pub train_rows:      usize,
    pub validation_rows: usize,
    pub test_rows:       usize,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Download, then run the local pipeline.
    pub fn execute(&self) -> Result<PrepareSummary> {
        let records = loader::load(&self.config.source_url)
            .with_context(|| format!("loading dataset from '{}'", self.config.source_url))?;
        self.run_with(records)
    }

    /// Everything after the download, network-free.
    pub fn run_with(&self, records: Vec<RawRecord>) -> Result<PrepareSummary> {
        let cfg = &self.config;

        let rows = transformer::transform(&records).context("transforming features")?;
        let sets = split_three(rows, &cfg.fractions(), cfg.seed).context("splitting dataset")?;

        let dir = PathBuf::from(&cfg.output_dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;

        let export = |name: &str, batch: String| -> Result<PathBuf> {
            let path = dir.join(name);
            fs::write(&path, batch).with_context(|| format!("Cannot write '{}'", path.display()))?;
            Ok(path)
        };

        let summary = PrepareSummary {
            train_rows:      sets.train.len(),
            validation_rows: sets.validation.len(),
            test_rows:       sets.test.len(),
            train_path:      export("train.csv", encoder::encode_training(&sets.train))?,
            validation_path: export("validation.csv", encoder::encode_training(&sets.validation))?,
            test_path:       export("test.csv", encoder::encode_training(&sets.test))?,
        };

        tracing::info!(
            "Exported {} train / {} validation / {} test row(s) to '{}'",
            summary.train_rows,
            summary.validation_rows,
            summary.test_rows,
            dir.display(),
        );

        Ok(summary)
    }
}
