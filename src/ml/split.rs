//! Seeded train/test splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Split items into `(train, test)` partitions.
///
/// The shuffle is driven by `seed` alone, so an identical input sequence
/// and seed always produce identical partition membership. The test
/// partition receives `round(len * test_ratio)` items, at least one when
/// the ratio is positive and the input is non-empty.
pub fn train_test_split<T: Clone>(items: &[T], test_ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_test = (items.len() as f64 * test_ratio).round() as usize;
    if n_test == 0 && test_ratio > 0.0 && !items.is_empty() {
        n_test = 1;
    }
    n_test = n_test.min(items.len());

    let (test_idx, train_idx) = indices.split_at(n_test);
    let train = train_idx.iter().map(|&i| items[i].clone()).collect();
    let test = test_idx.iter().map(|&i| items[i].clone()).collect();
    (train, test)
}
