// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO HTTP or file I/O here
//   - NO vendor client-library types here
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no network, no cloud account needed)
//   - Easy to understand (no client-library noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Observation rows before and after feature encoding
pub mod record;

// The error taxonomy every pipeline stage reports through
pub mod error;

// Value types describing a remote training job and its artifacts
pub mod platform;

// Core abstractions (traits) that outer layers implement
pub mod traits;
