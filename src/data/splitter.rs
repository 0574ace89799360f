// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set:   used to update model weights
//   - Validation set: used to measure performance on unseen data
//
// Why seed the shuffle?
//   The same seed on the same input must reproduce the exact
//   same partition, so a rerun of the pipeline is comparable
//   with the previous one. StdRng::seed_from_u64 gives that
//   guarantee across runs and platforms.
//
// Why shuffle at all?
//   News files are often ordered by class. Without shuffling
//   the validation slice would contain only the tail classes.
//
// The split is not stratified: with a small or imbalanced
// input, a class can be missing from the validation slice.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `samples` with the given seed and split off a
/// validation fraction.
///
/// # Arguments
/// * `samples`      - All available samples (consumed)
/// * `val_fraction` - Proportion held out for validation, e.g. 0.2
/// * `seed`         - RNG seed; same seed + same input ⇒ same split
///
/// # Returns
/// A tuple (train_samples, val_samples). Every input sample lands
/// in exactly one of the two.
pub fn split_train_val<T>(mut samples: Vec<T>, val_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fisher-Yates — every permutation equally likely
    samples.shuffle(&mut rng);

    // e.g. 100 samples, val_fraction 0.2 → first 80 are training
    let total = samples.len();
    let split_at = ((total as f64) * (1.0 - val_fraction)).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] and returns them
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val) = split_train_val(items, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(), 20);
    }

    #[test]
    fn test_all_items_preserved() {
        // No items may be lost or duplicated in the split
        let items: Vec<usize> = (0..53).collect();
        let (train, val) = split_train_val(items, 0.3, 42);
        assert_eq!(train.len() + val.len(), 53);

        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort_unstable();
        assert_eq!(all, (0..53).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let items: Vec<usize> = (0..200).collect();
        let (train_a, val_a) = split_train_val(items.clone(), 0.2, 42);
        let (train_b, val_b) = split_train_val(items, 0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(val_a, val_b);
    }

    #[test]
    fn test_different_seed_different_partition() {
        let items: Vec<usize> = (0..200).collect();
        let (train_a, _) = split_train_val(items.clone(), 0.2, 42);
        let (train_b, _) = split_train_val(items, 0.2, 43);
        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val) = split_train_val(items, 0.2, 42);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything_in_training() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val) = split_train_val(items, 0.0, 42);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
