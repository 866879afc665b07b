// ============================================================
// Layer 4 — Response Decoder
// ============================================================
// Parses the text an endpoint sends back and re-attaches the
// predictions to the rows that were submitted.
//
// The wire format is loose: the boosted-tree container returns
// one comma-separated line of predictions, but some serving
// stacks emit one prediction per line instead. The decoder
// accepts both (and any mix), splitting on commas and newlines
// alike.
//
// Alignment is purely positional — prediction i belongs to
// submitted row i — so merge() insists the counts match before
// pairing anything up. A mismatch means the conversation with
// the service went wrong, which is a ParseError, not something
// to paper over.

use crate::domain::error::PipelineError;
use crate::domain::record::{ModelRow, ScoredRow};

/// Parse response text into an ordered prediction sequence.
///
/// Tokens are separated by commas and/or line breaks. Empty
/// tokens (a trailing newline, say) are skipped; any other
/// token that is not a number fails the decode and is named in
/// the error.
pub fn decode(text: &str) -> Result<Vec<f64>, PipelineError> {
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                PipelineError::Parse(format!("prediction token '{token}' is not a number"))
            })
        })
        .collect()
}

/// Pair each submitted row with its prediction, by position.
pub fn merge(rows: Vec<ModelRow>, predictions: &[f64]) -> Result<Vec<ScoredRow>, PipelineError> {
    if rows.len() != predictions.len() {
        return Err(PipelineError::Parse(format!(
            "submitted {} row(s) but the service answered with {} prediction(s)",
            rows.len(),
            predictions.len()
        )));
    }

    Ok(rows
        .into_iter()
        .zip(predictions.iter().copied())
        .map(|(row, predicted)| ScoredRow::new(row, predicted))
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::encode_values;

    fn row(rings: u32) -> ModelRow {
        ModelRow {
            rings,
            female:         0,
            male:           0,
            infant:         1,
            length:         0.3,
            diameter:       0.2,
            height:         0.08,
            whole_weight:   0.2,
            shucked_weight: 0.09,
            viscera_weight: 0.05,
            shell_weight:   0.06,
        }
    }

    #[test]
    fn test_decode_single_line() {
        assert_eq!(decode("7.1,8.3,6.9").unwrap(), vec![7.1, 8.3, 6.9]);
    }

    #[test]
    fn test_decode_one_prediction_per_line() {
        assert_eq!(decode("7.1\n8.3\n6.9\n").unwrap(), vec![7.1, 8.3, 6.9]);
    }

    #[test]
    fn test_decode_tolerates_crlf_and_spaces() {
        assert_eq!(decode("7.1, 8.3\r\n6.9").unwrap(), vec![7.1, 8.3, 6.9]);
    }

    #[test]
    fn test_round_trip_numeric_identity() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(decode(&encode_values(&values)).unwrap(), values);
    }

    #[test]
    fn test_bad_token_is_parse_error() {
        let err = decode("7.1,abc,6.9").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_empty_text_decodes_to_nothing() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("\n").unwrap().is_empty());
    }

    #[test]
    fn test_merge_aligns_by_position() {
        let scored = merge(vec![row(9), row(12)], &[8.7, 11.2]).unwrap();
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].row.rings, 9);
        assert_eq!(scored[0].predicted, 8.7);
        assert_eq!(scored[1].row.rings, 12);
        assert_eq!(scored[1].predicted, 11.2);
    }

    #[test]
    fn test_merge_rejects_count_mismatch() {
        let err = merge(vec![row(9), row(12)], &[8.7]).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
        assert!(err.to_string().contains("2 row(s)"));
    }
}
