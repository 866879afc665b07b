// ============================================================
// Layer 2 — PipelineUseCase
// ============================================================
// Orchestrates the full run in order:
//
//   Step 1: Download and parse the dataset   (Layer 4 - data)
//   Step 2: Transform features              (Layer 4 - data)
//   Step 3: Split train/validation/test     (Layer 4 - data)
//   Step 4: Save the resolved config        (Layer 5 - infra)
//   Step 5: Encode and stage the channels   (Layer 4 + 5)
//   Step 6: Submit the training job         (remote, via trait)
//   Step 7: Deploy the model                (remote, via trait)
//   Step 8: Score the test set in batches   (remote + Layer 4)
//   Step 9: Write the prediction report     (Layer 5 - infra)
//   Step 10: Tear down the endpoint         (remote, via trait)
//
// On any failure the error propagates immediately and the run
// stops at the failing step. Remote resources created by
// earlier steps are NOT rolled back — a half-finished training
// job or a standing endpoint is the operator's to inspect and
// tear down.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::{
    decoder,
    encoder::{self, MAX_INVOKE_ROWS},
    loader,
    splitter::{split_three, SplitFractions},
    transformer,
};
use crate::domain::platform::{Hyperparameters, InstanceSpec, TrainingJobSpec};
use crate::domain::record::RawRecord;
use crate::domain::traits::{ModelHost, ObjectStore, TrainingPlatform};
use crate::infra::{
    report::{mean_abs_error, PredictionReport},
    staging::ChannelStager,
};

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Everything one run needs, resolved before any work starts.
// Serialisable so the exact configuration is written next to
// the run's outputs and the run can be reproduced later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub source_url: String,
    pub output_dir: String,

    // Remote staging location for the training channels
    pub bucket:     String,
    pub key_prefix: String,

    // Training job identity and resources
    pub job_name:        String,
    pub container_image: String,
    pub role:            String,
    pub instance_type:   String,
    pub instance_count:  u32,
    pub num_round:       u32,

    // Split control
    pub train_fraction:      f64,
    pub validation_fraction: f64,
    pub test_fraction:       f64,
    pub seed:                u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: "https://archive.ics.uci.edu/ml/machine-learning-databases/abalone/abalone.data"
                .to_string(),
            output_dir:          "output".to_string(),
            bucket:              "abalone-age".to_string(),
            key_prefix:          "channels".to_string(),
            job_name:            "abalone-age-job".to_string(),
            container_image:     "boosted-tree:latest".to_string(),
            role:                "pipeline-runner".to_string(),
            instance_type:       "m5.large".to_string(),
            instance_count:      1,
            num_round:           50,
            train_fraction:      0.70,
            validation_fraction: 0.15,
            test_fraction:       0.15,
            seed:                42,
        }
    }
}

impl PipelineConfig {
    pub fn fractions(&self) -> SplitFractions {
        SplitFractions {
            train:      self.train_fraction,
            validation: self.validation_fraction,
            test:       self.test_fraction,
        }
    }
}

/// What a completed run hands back to the CLI for display.
#[derive(Debug)]
pub struct RunSummary {
    pub rows_loaded:    usize,
    pub rows_scored:    usize,
    pub mean_abs_error: f64,
    pub model_uri:      String,
    pub report_path:    PathBuf,
}

// ─── PipelineUseCase ──────────────────────────────────────────────────────────
// Owns the config and the three platform collaborators, and
// runs the pipeline end to end. Generic over the traits so the
// same code drives the stub backend and a real one.
pub struct PipelineUseCase<S, T, H>
where
    S: ObjectStore,
    T: TrainingPlatform,
    H: ModelHost,
{
    config:   PipelineConfig,
    store:    S,
    platform: T,
    host:     H,
}

impl<S, T, H> PipelineUseCase<S, T, H>
where
    S: ObjectStore,
    T: TrainingPlatform,
    H: ModelHost,
{
    pub fn new(config: PipelineConfig, store: S, platform: T, host: H) -> Self {
        Self { config, store, platform, host }
    }

    /// Execute the full pipeline end to end.
    pub fn execute(&self) -> Result<RunSummary> {
        // ── Step 1: Download and parse the dataset ───────────────────────────
        let records = loader::load(&self.config.source_url)
            .with_context(|| format!("loading dataset from '{}'", self.config.source_url))?;
        self.run_with(records)
    }

    /// Everything after the download. Split out so tests can
    /// inject records without touching the network.
    pub fn run_with(&self, records: Vec<RawRecord>) -> Result<RunSummary> {
        let cfg = &self.config;
        let rows_loaded = records.len();

        // ── Step 2: Transform features ───────────────────────────────────────
        // Drops zero-height rows, one-hot encodes sex, puts the
        // rings label in column one
        let rows = transformer::transform(&records).context("transforming features")?;
        tracing::info!("Transformed {} of {} record(s)", rows.len(), rows_loaded);

        // ── Step 3: Split train/validation/test ──────────────────────────────
        let sets = split_three(rows, &cfg.fractions(), cfg.seed)
            .context("splitting dataset")?;
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            sets.train.len(),
            sets.validation.len(),
            sets.test.len(),
        );

        // ── Step 4: Save the resolved config ─────────────────────────────────
        // The stager creates the output directory; the config
        // lands next to the exported channels so the run can be
        // reproduced
        let stager = ChannelStager::new(&self.store, &cfg.output_dir, &cfg.bucket, &cfg.key_prefix)?;
        let config_path = PathBuf::from(&cfg.output_dir).join("run_config.json");
        fs::write(&config_path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", config_path.display()))?;

        // ── Step 5: Encode and stage the channels ────────────────────────────
        let train_uri      = stager.stage("train.csv", &encoder::encode_training(&sets.train))?;
        let validation_uri = stager.stage("validation.csv", &encoder::encode_training(&sets.validation))?;

        // ── Step 6: Submit the training job ──────────────────────────────────
        let job = TrainingJobSpec {
            job_name:        cfg.job_name.clone(),
            container_image: cfg.container_image.clone(),
            role:            cfg.role.clone(),
            instance: InstanceSpec {
                instance_type:  cfg.instance_type.clone(),
                instance_count: cfg.instance_count,
            },
            hyperparameters: Hyperparameters::boosted_tree_defaults(cfg.num_round),
            train_uri,
            validation_uri,
        };
        let artifact = self.platform.submit(&job).context("submitting training job")?;
        tracing::info!("Training complete: {}", artifact.uri);

        // ── Step 7: Deploy the model ─────────────────────────────────────────
        let endpoint = self
            .host
            .deploy(&artifact, &job.instance)
            .context("deploying model")?;

        // ── Step 8: Score the test set in batches ────────────────────────────
        // The endpoint accepts at most MAX_INVOKE_ROWS rows per
        // request, so the test set goes over in chunks; the
        // decoded predictions are concatenated back in order
        let mut predictions = Vec::with_capacity(sets.test.len());
        for chunk in sets.test.chunks(MAX_INVOKE_ROWS) {
            let body = encoder::encode_inference(chunk);
            let response = endpoint.invoke(&body).context("invoking endpoint")?;
            predictions.extend(decoder::decode(&response).context("decoding endpoint response")?);
        }
        let scored = decoder::merge(sets.test, &predictions)
            .context("merging predictions with test rows")?;

        // ── Step 9: Write the prediction report ──────────────────────────────
        let report = PredictionReport::new(&cfg.output_dir);
        report.write(&scored)?;
        let mae = mean_abs_error(&scored);
        tracing::info!("Mean absolute error: {:.3} rings over {} row(s)", mae, scored.len());

        // ── Step 10: Tear down the endpoint ──────────────────────────────────
        // Only reached on success; a failed run leaves the
        // endpoint standing for the operator
        endpoint.delete().context("deleting endpoint")?;

        Ok(RunSummary {
            rows_loaded,
            rows_scored:    scored.len(),
            mean_abs_error: mae,
            model_uri:      artifact.uri,
            report_path:    report.csv_path().to_path_buf(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stub_backend::StubBackend;
    use std::path::Path;

    /// Synthetic records cycling through the three sex
    /// categories, with an occasional zero-height bad row.
    fn synthetic_records(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| RawRecord {
                sex:            ["F", "M", "I"][i % 3].to_string(),
                length:         0.4 + (i % 10) as f64 * 0.01,
                diameter:       0.3,
                height:         if i % 50 == 49 { 0.0 } else { 0.1 },
                whole_weight:   0.5,
                shucked_weight: 0.2,
                viscera_weight: 0.1,
                shell_weight:   0.15,
                rings:          5 + (i % 15) as u32,
            })
            .collect()
    }

    fn run(n: usize, dir_name: &str) -> RunSummary {
        let dir = std::env::temp_dir()
            .join(format!("abalone-age-pipeline-{}-{dir_name}", std::process::id()));

        let config = PipelineConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            ..PipelineConfig::default()
        };

        let backend = StubBackend::new();
        let use_case =
            PipelineUseCase::new(config, backend.store(), backend.platform(), backend.host());

        let summary = use_case.run_with(synthetic_records(n)).unwrap();
        std::fs::remove_dir_all(dir).ok();
        summary
    }

    #[test]
    fn test_end_to_end_against_stub_backend() {
        let summary = run(200, "e2e");

        assert_eq!(summary.rows_loaded, 200);
        // 4 zero-height rows dropped → 196 transformed;
        // 137 train + 29 validation leaves 30 test rows
        assert_eq!(summary.rows_scored, 30);
        assert!(summary.mean_abs_error >= 0.0);
        assert!(summary.model_uri.starts_with("mem://artifacts/"));
    }

    #[test]
    fn test_run_writes_report_and_config() {
        let dir = std::env::temp_dir()
            .join(format!("abalone-age-pipeline-{}-files", std::process::id()));

        let config = PipelineConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            ..PipelineConfig::default()
        };

        let backend = StubBackend::new();
        let use_case =
            PipelineUseCase::new(config, backend.store(), backend.platform(), backend.host());
        let summary = use_case.run_with(synthetic_records(100)).unwrap();

        assert!(Path::new(&summary.report_path).exists());
        assert!(dir.join("run_config.json").exists());
        assert!(dir.join("train.csv").exists());
        assert!(dir.join("validation.csv").exists());

        let report = std::fs::read_to_string(&summary.report_path).unwrap();
        // Header plus one line per scored row
        assert_eq!(report.lines().count(), summary.rows_scored + 1);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_large_test_set_is_scored_in_batches() {
        // 4000 records → test set well above the 500-row invoke
        // cap, so scoring must span multiple requests and still
        // come back aligned
        let summary = run(4000, "batched");
        assert!(summary.rows_scored > MAX_INVOKE_ROWS);
    }

    #[test]
    fn test_bad_fraction_flags_fail_as_error_not_panic() {
        let dir = std::env::temp_dir()
            .join(format!("abalone-age-pipeline-{}-fractions", std::process::id()));
        // What `run --train-fraction 0.8` resolves to with the
        // other two fraction flags left at their defaults
        let config = PipelineConfig {
            output_dir:     dir.to_string_lossy().into_owned(),
            train_fraction: 0.8,
            ..PipelineConfig::default()
        };

        let backend = StubBackend::new();
        let use_case =
            PipelineUseCase::new(config, backend.store(), backend.platform(), backend.host());

        let err = use_case.run_with(synthetic_records(100)).unwrap_err();
        assert!(err.to_string().contains("splitting dataset"));
        assert!(format!("{:#}", err).contains("sum to 1"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_too_small_dataset_fails_at_split() {
        let dir = std::env::temp_dir()
            .join(format!("abalone-age-pipeline-{}-tiny", std::process::id()));
        let config = PipelineConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            ..PipelineConfig::default()
        };

        let backend = StubBackend::new();
        let use_case =
            PipelineUseCase::new(config, backend.store(), backend.platform(), backend.host());

        let err = use_case.run_with(synthetic_records(2)).unwrap_err();
        assert!(err.to_string().contains("splitting dataset"));

        std::fs::remove_dir_all(dir).ok();
    }
}
