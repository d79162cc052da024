//! Seeded shuffling, oversampling and ratio splits.
//!
//! Every function takes the RNG explicitly so a whole load can be replayed
//! from one seed.

use rand::seq::SliceRandom;
use rand::Rng;

/// Repeat `records` so the result holds `factor + 1` copies, then shuffle.
///
/// `factor == 0` returns the records unchanged and does not touch the RNG.
#[must_use]
pub fn oversample<T: Clone, R: Rng + ?Sized>(
    records: Vec<T>,
    factor: usize,
    rng: &mut R,
) -> Vec<T> {
    if factor == 0 {
        return records;
    }
    let mut out = Vec::with_capacity(records.len() * (factor + 1));
    for _ in 0..=factor {
        out.extend_from_slice(&records);
    }
    out.shuffle(rng);
    out
}

/// Shuffle `records` and split them into `(train, rest)`.
///
/// The first `floor(train_fraction * len)` shuffled records go to train,
/// clamped to `len`.
#[must_use]
pub fn shuffle_split<T, R: Rng + ?Sized>(
    mut records: Vec<T>,
    train_fraction: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    records.shuffle(rng);
    let total = records.len();
    let split_at = ((total as f64) * train_fraction).floor().max(0.0) as usize;
    let rest = records.split_off(split_at.min(total));
    (records, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_oversample_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<usize> = (0..10).collect();
        let out = oversample(items, 3, &mut rng);
        assert_eq!(out.len(), 40);
        for i in 0..10 {
            assert_eq!(out.iter().filter(|&&x| x == i).count(), 4);
        }
    }

    #[test]
    fn test_oversample_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<usize> = (0..5).collect();
        assert_eq!(oversample(items.clone(), 0, &mut rng), items);
    }

    #[test]
    fn test_oversample_permutes() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<usize> = (0..50).collect();
        let out = oversample(items.clone(), 1, &mut rng);
        let mut sorted_copy = items.clone();
        sorted_copy.extend(items);
        assert_ne!(out, sorted_copy);
    }

    #[test]
    fn test_split_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        let items: Vec<usize> = (0..100).collect();
        let (train, val) = shuffle_split(items, 0.8, &mut rng);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(), 20);
    }

    #[test]
    fn test_split_floors_train_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let items: Vec<usize> = (0..7).collect();
        let (train, val) = shuffle_split(items, 0.5, &mut rng);
        assert_eq!(train.len(), 3);
        assert_eq!(val.len(), 4);
    }

    #[test]
    fn test_split_preserves_all_items() {
        let mut rng = StdRng::seed_from_u64(3);
        let items: Vec<usize> = (0..50).collect();
        let (train, val) = shuffle_split(items, 0.7, &mut rng);
        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_full_and_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let (train, val) = shuffle_split((0..10).collect::<Vec<usize>>(), 1.0, &mut rng);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());

        let (train, val) = shuffle_split(Vec::<usize>::new(), 0.8, &mut rng);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_same_seed_same_split() {
        let items: Vec<usize> = (0..30).collect();
        let a = shuffle_split(items.clone(), 0.6, &mut StdRng::seed_from_u64(9));
        let b = shuffle_split(items, 0.6, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
