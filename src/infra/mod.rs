// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles the cross-cutting concerns that don't belong in any
// specific business layer:
//
//   staging.rs      — Exports an encoded batch to a transient
//                     local file, then uploads it through the
//                     ObjectStore trait and hands back the
//                     remote URI for the training channels.
//
//   report.rs       — Writes the per-row prediction report as a
//                     CSV and computes the aggregate error
//                     summary for the run.
//
//   stub_backend.rs — In-memory implementations of all three
//                     platform traits (store, training,
//                     hosting). Lets the pipeline run end to end
//                     offline and gives tests a backend that
//                     honours the real wire contract.
//
// Why is this a separate layer?
//   These concerns are used by the application layer but are
//   not data-pipeline logic. Keeping them here makes it easy to
//   swap implementations (e.g. swap the stub backend for a real
//   cloud client) without touching the pipeline itself.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Local export + upload of encoded batches
pub mod staging;

/// Prediction report CSV and error summary
pub mod report;

/// In-memory object store, trainer and host
pub mod stub_backend;
