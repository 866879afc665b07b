// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// The remote platform is split into three capability groups,
// one trait each:
//   - ObjectStore      → staging blobs before training
//   - TrainingPlatform → submitting a training job
//   - ModelHost        → deploying and invoking an endpoint
//
// By programming against these traits instead of a vendor SDK,
// the application layer works identically against a real cloud
// backend or the bundled in-memory stub, and the whole pipeline
// is testable without a cloud account.
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use crate::domain::error::PipelineError;
use crate::domain::platform::{InstanceSpec, ModelArtifact, TrainingJobSpec};

// ─── ObjectStore ──────────────────────────────────────────────────────────────
/// A remote key/value blob store used to stage training data.
///
/// Implementations:
///   - InMemoryStore (infra) → HashMap-backed, for tests and offline runs
///   - (future) a real cloud object-storage client
pub trait ObjectStore {
    /// Store `bytes` under `bucket`/`key` and return the remote
    /// URI the training platform should read it from.
    fn put(&self, bytes: &[u8], bucket: &str, key: &str) -> Result<String, PipelineError>;
}

// ─── TrainingPlatform ─────────────────────────────────────────────────────────
/// A managed service that runs an opaque training container over
/// staged CSV channels and produces a binary model artifact.
///
/// The call blocks until the job completes or fails terminally.
/// Retries and job-level cancellation are the platform's own
/// business, not ours.
pub trait TrainingPlatform {
    fn submit(&self, job: &TrainingJobSpec) -> Result<ModelArtifact, PipelineError>;
}

// ─── ModelHost ────────────────────────────────────────────────────────────────
/// A managed hosting service that turns a model artifact into an
/// invokable endpoint.
pub trait ModelHost {
    fn deploy(
        &self,
        artifact: &ModelArtifact,
        instance: &InstanceSpec,
    ) -> Result<Box<dyn Endpoint>, PipelineError>;
}

/// A deployed, invokable instance of a trained model.
///
/// The wire contract is text/csv both ways: the request body is
/// a label-less encoded batch, the response is one numeric
/// prediction per submitted row.
pub trait Endpoint {
    fn invoke(&self, csv_body: &str) -> Result<String, PipelineError>;

    /// Tear down the hosting resources. Never called
    /// automatically on failure — cleanup of a half-built run is
    /// the operator's decision.
    fn delete(&self) -> Result<(), PipelineError>;
}
