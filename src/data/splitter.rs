// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Randomly shuffles rows and partitions them into three sets:
//   - Training set:   what the boosted-tree container fits on
//   - Validation set: what the container evaluates against
//                     while training (early-stopping signal)
//   - Test set:       held back entirely; scored through the
//                     deployed endpoint at the very end
//
// Why shuffle before splitting?
//   The source file is sorted by collection batch. Without
//   shuffling, the test set would contain only the last-caught
//   animals — not a representative sample.
//
// Default ratio: 70% train, 15% validation, 15% test,
// i.e. 70% train and then a 50/50 split of the remainder.
// The fractions are configurable.
//
// The shuffle uses Fisher-Yates via rand::seq::SliceRandom with
// an explicitly seeded StdRng, so the same seed over the same
// input always yields the same partition — a requirement for
// reproducible runs and deterministic tests.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::error::PipelineError;

/// Fewest rows that can still be partitioned three ways.
pub const MIN_SPLIT_ROWS: usize = 3;

/// Target fractions for the three partitions. Must be
/// non-negative and sum to 1.
#[derive(Debug, Clone, Copy)]
pub struct SplitFractions {
    pub train:      f64,
    pub validation: f64,
    pub test:       f64,
}

impl Default for SplitFractions {
    /// 70% train, then 50/50 of the remainder.
    fn default() -> Self {
        Self { train: 0.70, validation: 0.15, test: 0.15 }
    }
}

impl SplitFractions {
    /// True when every fraction is in [0, 1] and they sum to 1
    /// (within floating-point tolerance).
    pub fn is_valid(&self) -> bool {
        let parts = [self.train, self.validation, self.test];
        parts.iter().all(|f| (0.0..=1.0).contains(f))
            && (parts.iter().sum::<f64>() - 1.0).abs() < 1e-9
    }
}

/// The three partitions produced by one split.
#[derive(Debug)]
pub struct SplitSets<T> {
    pub train:      Vec<T>,
    pub validation: Vec<T>,
    pub test:       Vec<T>,
}

impl<T> SplitSets<T> {
    pub fn total_rows(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }
}

/// Shuffle `rows` with the given seed and partition them by
/// `fractions`.
///
/// The outputs partition the input exactly: every input row
/// lands in exactly one output set. A fraction that rounds to
/// zero rows produces an empty partition, which is allowed.
///
/// # Errors
/// `SchemaError` when the fractions are negative or do not sum
/// to 1 — they arrive straight from CLI flags, so a bad triple
/// is user input, not a bug. `InsufficientDataError` when there
/// are fewer than MIN_SPLIT_ROWS input rows.
pub fn split_three<T>(
    mut rows: Vec<T>,
    fractions: &SplitFractions,
    seed: u64,
) -> Result<SplitSets<T>, PipelineError> {
    if !fractions.is_valid() {
        return Err(PipelineError::Schema(format!(
            "split fractions must be non-negative and sum to 1, got {:.2}/{:.2}/{:.2}",
            fractions.train, fractions.validation, fractions.test,
        )));
    }

    let total = rows.len();
    if total < MIN_SPLIT_ROWS {
        return Err(PipelineError::InsufficientData { rows: total, min: MIN_SPLIT_ROWS });
    }

    // Fisher-Yates shuffle, seeded for reproducibility
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    // Round each boundary, then clamp so the three counts can
    // never exceed the total. Whatever rounding leaves over (or
    // takes away) lands in the test partition, so no row is
    // ever dropped or duplicated.
    let n_train = ((total as f64) * fractions.train).round() as usize;
    let n_train = n_train.min(total);

    let n_validation = ((total as f64) * fractions.validation).round() as usize;
    let n_validation = n_validation.min(total - n_train);

    // split_off(n) removes elements [n..] and returns them:
    // after the first call `rows` is the training set, after the
    // second `rest` is the validation set
    let mut rest = rows.split_off(n_train);
    let test     = rest.split_off(n_validation);

    let sets = SplitSets { train: rows, validation: rest, test };

    tracing::debug!(
        "Dataset split: {} train, {} validation, {} test (seed {seed})",
        sets.train.len(),
        sets.validation.len(),
        sets.test.len(),
    );

    Ok(sets)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fraction_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let sets = split_three(items, &SplitFractions::default(), 7).unwrap();
        assert_eq!(sets.train.len(), 70);
        assert_eq!(sets.validation.len(), 15);
        assert_eq!(sets.test.len(), 15);
    }

    #[test]
    fn test_outputs_partition_the_input() {
        let items: Vec<usize> = (0..97).collect();
        let sets = split_three(items, &SplitFractions::default(), 42).unwrap();

        // Union of the three sets must equal the input set:
        // same length and no duplicates means no drops either
        let mut all: Vec<usize> = sets
            .train
            .iter()
            .chain(sets.validation.iter())
            .chain(sets.test.iter())
            .copied()
            .collect();
        all.sort_unstable();

        assert_eq!(all.len(), 97);
        assert_eq!(all, (0..97).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = split_three((0..50).collect(), &SplitFractions::default(), 9).unwrap();
        let b = split_three((0..50).collect(), &SplitFractions::default(), 9).unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.validation, b.validation);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn test_different_seed_different_order() {
        let a = split_three((0..200).collect::<Vec<usize>>(), &SplitFractions::default(), 1)
            .unwrap();
        let b = split_three((0..200).collect::<Vec<usize>>(), &SplitFractions::default(), 2)
            .unwrap();
        // With 140 of 200 rows in each training set, identical
        // ordering across two seeds is practically impossible
        assert_ne!(a.train, b.train);
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        let err = split_three(Vec::<usize>::new(), &SplitFractions::default(), 0).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData { rows: 0, .. }));
    }

    #[test]
    fn test_two_rows_is_insufficient() {
        let err = split_three(vec![1, 2], &SplitFractions::default(), 0).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData { rows: 2, .. }));
    }

    #[test]
    fn test_fraction_rounding_to_zero_gives_empty_partition() {
        // 4 rows at 90/5/5: validation and test both round to 0
        // rows — that must produce empty sets, not an error
        let fractions = SplitFractions { train: 0.90, validation: 0.05, test: 0.05 };
        let sets = split_three(vec![1, 2, 3, 4], &fractions, 3).unwrap();
        assert_eq!(sets.train.len(), 4);
        assert!(sets.validation.is_empty());
        assert!(sets.test.is_empty());
        assert_eq!(sets.total_rows(), 4);
    }

    #[test]
    fn test_fractions_not_summing_to_one_is_schema_error() {
        // --train-fraction 0.8 with the other two flags left at
        // their defaults produces exactly this triple
        let fractions = SplitFractions { train: 0.8, validation: 0.15, test: 0.15 };
        let err = split_three((0..100).collect::<Vec<usize>>(), &fractions, 42).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn test_negative_fraction_is_schema_error() {
        let fractions = SplitFractions { train: 1.2, validation: -0.1, test: -0.1 };
        let err = split_three(vec![1, 2, 3], &fractions, 0).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }
}
