// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything between the raw remote file and
// the text payloads that cross the wire to the platform.
//
// The pipeline flows in this order:
//
//   remote CSV file
//       │
//       ▼
//   loader            → downloads and parses the 9-column file
//       │
//       ▼
//   transformer       → drops zero-height rows, one-hot encodes
//       │                sex, moves the label to column one
//       ▼
//   splitter          → seeded shuffle into train/validation/test
//       │
//       ▼
//   encoder           → rows to delimited text (train/inference)
//       │
//       ▼
//   (remote training, deployment and invocation)
//       │
//       ▼
//   decoder           → response text back to numbers, merged
//                       positionally with the submitted rows
//
// Each module is responsible for exactly one step, and every
// step except the download is a pure function of its input
// (plus the splitter's seed). This makes each step
// independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Downloads the raw dataset and parses it into records
pub mod loader;

/// Cleans rows and encodes categorical features
pub mod transformer;

/// Seeded shuffle and three-way partition
pub mod splitter;

/// Serialises rows into delimited text batches
pub mod encoder;

/// Parses endpoint responses back into predictions
pub mod decoder;
