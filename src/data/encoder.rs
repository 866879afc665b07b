// ============================================================
// Layer 4 — Payload Encoder
// ============================================================
// Serialises ModelRows into the delimited text the platform
// consumes: one row per line, fields comma-separated, no header
// and no trailing whitespace.
//
// Two line forms, both derived from ModelRow's field order:
//   - training form:  rings label first, then all features
//                     (what the training container reads)
//   - inference form: features only, label omitted
//                     (what a deployed endpoint accepts)
//
// Encoding is deterministic — the same rows always produce
// byte-identical text — because each f64 prints via Rust's
// shortest-round-trip Display and field order is fixed by the
// struct declaration.
//
// The endpoint accepts at most MAX_INVOKE_ROWS rows per
// request. Enforcing that cap is the caller's job: the encoder
// happily encodes any batch it is given, and the application
// layer chunks the test set before invoking.

use crate::domain::record::ModelRow;

/// Largest batch the inference endpoint accepts per request.
pub const MAX_INVOKE_ROWS: usize = 500;

/// Encode rows in the training form: label column first.
pub fn encode_training(rows: &[ModelRow]) -> String {
    encode_lines(rows, ModelRow::training_fields)
}

/// Encode rows in the inference form: label column omitted.
pub fn encode_inference(rows: &[ModelRow]) -> String {
    encode_lines(rows, ModelRow::feature_fields)
}

/// Encode a plain numeric sequence as one comma-separated line —
/// the same shape an endpoint response comes back in.
pub fn encode_values(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn encode_lines(rows: &[ModelRow], fields: impl Fn(&ModelRow) -> Vec<String>) -> String {
    rows.iter()
        .map(|row| fields(row).join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<ModelRow> {
        (0..n)
            .map(|i| ModelRow {
                rings:          i as u32 + 5,
                female:         1,
                male:           0,
                infant:         0,
                length:         0.455 + i as f64,
                diameter:       0.365,
                height:         0.095,
                whole_weight:   0.514,
                shucked_weight: 0.2245,
                viscera_weight: 0.101,
                shell_weight:   0.15,
            })
            .collect()
    }

    #[test]
    fn test_one_line_per_row() {
        let batch = encode_training(&rows(17));
        assert_eq!(batch.lines().count(), 17);
    }

    #[test]
    fn test_training_line_starts_with_label() {
        let batch = encode_training(&rows(1));
        assert!(batch.starts_with("5,1,0,0,0.455,"));
    }

    #[test]
    fn test_inference_form_omits_exactly_the_label() {
        let data = rows(3);
        let training:  Vec<String> = encode_training(&data).lines().map(String::from).collect();
        let inference: Vec<String> = encode_inference(&data).lines().map(String::from).collect();

        for (t, i) in training.iter().zip(&inference) {
            // Stripping the leading label field from the training
            // line must give the inference line verbatim
            let (label, rest) = t.split_once(',').unwrap();
            assert_eq!(rest, i);
            assert!(label.parse::<u32>().is_ok());
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let data = rows(10);
        assert_eq!(encode_training(&data), encode_training(&data));
        assert_eq!(encode_inference(&data), encode_inference(&data));
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let batch = encode_training(&rows(4));
        for line in batch.lines() {
            assert_eq!(line, line.trim_end());
        }
        assert!(!batch.ends_with('\n'));
    }

    #[test]
    fn test_empty_batch_is_empty_text() {
        assert_eq!(encode_training(&[]), "");
        assert_eq!(encode_inference(&[]), "");
    }

    #[test]
    fn test_encode_values() {
        assert_eq!(encode_values(&[7.1, 8.3, 6.9]), "7.1,8.3,6.9");
        assert_eq!(encode_values(&[]), "");
    }
}
