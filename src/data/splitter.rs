// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles the loaded rows and splits them into two sets:
//   - Training set: used to fit the feature pipeline and model
//   - Test set:     held out, only used for evaluation
//
// The census file is not ordered randomly, so we shuffle before
// splitting. The shuffle is driven by a seeded StdRng so the
// same seed always yields the same split.
//
// Default split: 90% training, 10% test.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `rows` with `seed` and split into (train, test).
///
/// `test_fraction` is clamped to [0, 1]; the training set gets
/// `round(n * (1 - test_fraction))` rows.
pub fn train_test_split<T>(mut rows: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let test_fraction = if test_fraction.is_nan() { 0.0 } else { test_fraction.clamp(0.0, 1.0) };

    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let total    = rows.len();
    let split_at = ((total as f64) * (1.0 - test_fraction)).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) leaves [0..n] in `rows` and returns [n..]
    let test = rows.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        rows.len(),
        test.len(),
        seed,
    );

    (rows, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = train_test_split(items, 0.1, 7);
        assert_eq!(train.len(), 90);
        assert_eq!(test.len(),  10);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = train_test_split(items, 0.3, 7);
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = train_test_split((0..200).collect::<Vec<usize>>(), 0.1, 42);
        let b = train_test_split((0..200).collect::<Vec<usize>>(), 0.1, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = train_test_split(Vec::<usize>::new(), 0.1, 1);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_fraction_is_clamped() {
        let (train, test) = train_test_split((0..10).collect::<Vec<usize>>(), 1.5, 1);
        assert!(train.is_empty());
        assert_eq!(test.len(), 10);

        let (train, test) = train_test_split((0..10).collect::<Vec<usize>>(), -0.5, 1);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
