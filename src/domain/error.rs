// ============================================================
// Layer 3 — Pipeline Error Taxonomy
// ============================================================
// Every failure a pipeline stage can report, as one enum.
//
// The policy is strict: errors surface immediately to the
// caller, there is no local recovery and no silent default.
// Failures from the remote collaborators (storage, training,
// hosting) are passed through as RemoteService without being
// interpreted or retried — retry logic belongs to the
// collaborator's own client, not to this pipeline.
//
// thiserror derives std::error::Error + Display for us, so
// these values flow through anyhow::Result at the application
// layer with full context intact.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input data did not match the expected schema:
    /// an unknown sex category, a negative height, a malformed
    /// numeric field, or a row with the wrong column count.
    #[error("schema error: {0}")]
    Schema(String),

    /// Too few rows to form the three split partitions.
    #[error("insufficient data: {rows} row(s), need at least {min} to split")]
    InsufficientData { rows: usize, min: usize },

    /// The endpoint's response text could not be parsed into
    /// numbers, or answered for a different row count than was
    /// submitted.
    #[error("parse error: {0}")]
    Parse(String),

    /// An opaque failure from a storage, training or hosting
    /// collaborator, surfaced unchanged.
    #[error("remote service error: {0}")]
    RemoteService(String),
}

impl PipelineError {
    /// Shorthand used by the data layer when a specific line of
    /// the source file is at fault.
    pub fn schema_at_line(line_no: usize, message: impl std::fmt::Display) -> Self {
        Self::Schema(format!("line {line_no}: {message}"))
    }
}
