// ============================================================
// Layer 3 — Observation Record Types
// ============================================================
// Two shapes of the same physical observation:
//
//   RawRecord — one line of the source file, parsed but not yet
//               validated. The sex field is kept as raw text so
//               the Feature Transformer owns its validation.
//
//   ModelRow  — the model-ready form. The categorical sex field
//               has been replaced by three binary indicators and
//               the rings label has moved to the front.
//
// The DECLARED FIELD ORDER of ModelRow is the column order of
// every encoded batch. Both the labelled (training) and
// label-less (inference) line forms are derived from the same
// field list, so the two can never disagree on feature order.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §10 (Derive Macros)

/// One observation as parsed from the raw dataset, in source
/// column order. Nothing is validated yet beyond "the numbers
/// parsed as numbers".
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Raw categorical field — expected to be F, M or I,
    /// but validation belongs to the Feature Transformer
    pub sex: String,

    pub length:         f64,
    pub diameter:       f64,
    pub height:         f64,
    pub whole_weight:   f64,
    pub shucked_weight: f64,
    pub viscera_weight: f64,
    pub shell_weight:   f64,

    /// Ring count — the label we train the model to predict
    pub rings: u32,
}

/// One model-ready row. Field order = encoded column order:
/// label first, then the three sex indicators, then the seven
/// physical measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRow {
    pub rings: u32,

    // Mutually exclusive one-hot encoding of the sex field —
    // exactly one of these is 1 for every row
    pub female: u8,
    pub male:   u8,
    pub infant: u8,

    pub length:         f64,
    pub diameter:       f64,
    pub height:         f64,
    pub whole_weight:   f64,
    pub shucked_weight: f64,
    pub viscera_weight: f64,
    pub shell_weight:   f64,
}

impl ModelRow {
    /// All fields in encoded column order, label included.
    /// This is the training line form.
    ///
    /// f64 values use Rust's default Display, which prints the
    /// shortest string that round-trips back to the same f64 —
    /// no precision is lost and the output is deterministic.
    pub fn training_fields(&self) -> Vec<String> {
        let mut fields = vec![self.rings.to_string()];
        fields.extend(self.feature_fields());
        fields
    }

    /// Feature fields only, label omitted.
    /// This is the inference line form.
    pub fn feature_fields(&self) -> Vec<String> {
        vec![
            self.female.to_string(),
            self.male.to_string(),
            self.infant.to_string(),
            self.length.to_string(),
            self.diameter.to_string(),
            self.height.to_string(),
            self.whole_weight.to_string(),
            self.shucked_weight.to_string(),
            self.viscera_weight.to_string(),
            self.shell_weight.to_string(),
        ]
    }

    /// Sum of the three sex indicators — always 1 for a row
    /// produced by the Feature Transformer.
    pub fn indicator_sum(&self) -> u8 {
        self.female + self.male + self.infant
    }
}

/// A test-set row merged with the prediction the endpoint
/// returned for it. Predictions are matched to rows purely by
/// position, so this type only exists after the decode step has
/// verified the counts line up.
#[derive(Debug, Clone)]
pub struct ScoredRow {
    pub row:       ModelRow,
    pub predicted: f64,
}

impl ScoredRow {
    pub fn new(row: ModelRow, predicted: f64) -> Self {
        Self { row, predicted }
    }

    /// Absolute difference between the true ring count and the
    /// (fractional) predicted ring count.
    pub fn abs_error(&self) -> f64 {
        (self.row.rings as f64 - self.predicted).abs()
    }
}
