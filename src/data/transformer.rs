// ============================================================
// Layer 4 — Feature Transformer
// ============================================================
// Turns parsed RawRecords into model-ready ModelRows.
//
// Three things happen here, in order:
//
//   1. Rows with height == 0 are dropped. These are known
//      measurement errors in the source data — an abalone with
//      no height was mis-calipered, not flat — so they are
//      filtered, never treated as failures.
//
//   2. The remaining rows are validated: a negative height or a
//      sex value outside {F, M, I} means the input does not
//      match the documented schema and the whole transform
//      fails.
//
//   3. The categorical sex field becomes three binary indicator
//      columns (female, male, infant) — exactly one set per
//      row — and the rings label moves to the first column,
//      which is where the training container expects it.
//
// The transform is functional: the input slice is only
// borrowed, and a fresh Vec is returned.
//
// Reference: Rust Book §13 (Iterators)

use crate::domain::error::PipelineError;
use crate::domain::record::{ModelRow, RawRecord};

/// Transform raw records into model rows.
pub fn transform(records: &[RawRecord]) -> Result<Vec<ModelRow>, PipelineError> {
    // Step 1: drop zero-height measurement errors
    let retained: Vec<&RawRecord> = records.iter().filter(|r| r.height != 0.0).collect();

    let dropped = records.len() - retained.len();
    if dropped > 0 {
        tracing::info!("Dropped {dropped} zero-height row(s) as measurement errors");
    }

    // Steps 2 and 3: validate and encode each retained row
    retained.into_iter().map(encode_row).collect()
}

/// Validate one retained row and encode its categorical field.
fn encode_row(record: &RawRecord) -> Result<ModelRow, PipelineError> {
    if record.height < 0.0 {
        return Err(PipelineError::Schema(format!(
            "height must be positive, got {}",
            record.height
        )));
    }

    // One-hot encoding: the three indicators are mutually
    // exclusive and sum to 1 by construction
    let (female, male, infant) = match record.sex.as_str() {
        "F" => (1, 0, 0),
        "M" => (0, 1, 0),
        "I" => (0, 0, 1),
        other => {
            return Err(PipelineError::Schema(format!(
                "unknown sex category '{other}' (expected F, M or I)"
            )))
        }
    };

    Ok(ModelRow {
        rings: record.rings,
        female,
        male,
        infant,
        length:         record.length,
        diameter:       record.diameter,
        height:         record.height,
        whole_weight:   record.whole_weight,
        shucked_weight: record.shucked_weight,
        viscera_weight: record.viscera_weight,
        shell_weight:   record.shell_weight,
    })
}
