// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `run` and `prepare`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::pipeline_use_case::PipelineConfig;
use crate::application::prepare_use_case::PrepareConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: download, prepare, train, deploy,
    /// score the test set, tear down
    Run(RunArgs),

    /// Download and prepare the data only — export the
    /// train/validation/test CSVs without touching the platform
    Prepare(PrepareArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// URL of the raw 9-column abalone dataset
    #[arg(
        long,
        default_value = "https://archive.ics.uci.edu/ml/machine-learning-databases/abalone/abalone.data"
    )]
    pub source_url: String,

    /// Directory for exported channels, the run config and the
    /// prediction report
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Bucket the training channels are staged into
    #[arg(long, default_value = "abalone-age")]
    pub bucket: String,

    /// Key prefix under the bucket for this run's channels
    #[arg(long, default_value = "channels")]
    pub key_prefix: String,

    /// Name of the training job on the platform
    #[arg(long, default_value = "abalone-age-job")]
    pub job_name: String,

    /// Training container image reference
    #[arg(long, default_value = "boosted-tree:latest")]
    pub container_image: String,

    /// Credential/role the platform assumes for the job
    #[arg(long, default_value = "pipeline-runner")]
    pub role: String,

    /// Instance type for training and hosting
    #[arg(long, default_value = "m5.large")]
    pub instance_type: String,

    /// Number of instances
    #[arg(long, default_value_t = 1)]
    pub instance_count: u32,

    /// Boosting rounds for the training container
    #[arg(long, default_value_t = 50)]
    pub num_round: u32,

    /// Fraction of rows used for training
    #[arg(long, default_value_t = 0.70)]
    pub train_fraction: f64,

    /// Fraction of rows used for in-training validation
    #[arg(long, default_value_t = 0.15)]
    pub validation_fraction: f64,

    /// Fraction of rows held out and scored through the endpoint
    #[arg(long, default_value_t = 0.15)]
    pub test_fraction: f64,

    /// Shuffle seed — the same seed reproduces the same split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI RunArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        PipelineConfig {
            source_url:          a.source_url,
            output_dir:          a.output_dir,
            bucket:              a.bucket,
            key_prefix:          a.key_prefix,
            job_name:            a.job_name,
            container_image:     a.container_image,
            role:                a.role,
            instance_type:       a.instance_type,
            instance_count:      a.instance_count,
            num_round:           a.num_round,
            train_fraction:      a.train_fraction,
            validation_fraction: a.validation_fraction,
            test_fraction:       a.test_fraction,
            seed:                a.seed,
        }
    }
}

/// All arguments for the `prepare` command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// URL of the raw 9-column abalone dataset
    #[arg(
        long,
        default_value = "https://archive.ics.uci.edu/ml/machine-learning-databases/abalone/abalone.data"
    )]
    pub source_url: String,

    /// Directory the three CSV files are written into
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Fraction of rows used for training
    #[arg(long, default_value_t = 0.70)]
    pub train_fraction: f64,

    /// Fraction of rows used for in-training validation
    #[arg(long, default_value_t = 0.15)]
    pub validation_fraction: f64,

    /// Fraction of rows held out as the test set
    #[arg(long, default_value_t = 0.15)]
    pub test_fraction: f64,

    /// Shuffle seed — the same seed reproduces the same split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            source_url:          a.source_url,
            output_dir:          a.output_dir,
            train_fraction:      a.train_fraction,
            validation_fraction: a.validation_fraction,
            test_fraction:       a.test_fraction,
            seed:                a.seed,
        }
    }
}
