// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (a full pipeline run, or a local data
// preparation pass).
//
// Rules for this layer:
//   - No parsing or encoding logic here (that's Layer 4)
//   - No UI or printing here (that's Layer 1)
//   - No concrete backend types here — only the domain traits
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The end-to-end train/deploy/score workflow
pub mod pipeline_use_case;

// The local-only download/transform/split/export workflow
pub mod prepare_use_case;
