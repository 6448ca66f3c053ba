use rand::{seq::SliceRandom, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::Serialize;

/// Row indices of the two partitions, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Seeded random partition of `n` rows. The test partition holds `ceil(n * test_fraction)`
/// rows; the same `(n, test_fraction, seed)` always yields the same partition.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> TrainTestSplit {
    // Products such as 0.1 * 30 land just above the integer.
    let n_test = ((n as f64) * test_fraction - 1e-9).ceil().clamp(0.0, n as f64) as usize;

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let mut test = indices.split_off(n - n_test);
    let mut train = indices;
    train.sort_unstable();
    test.sort_unstable();

    log::debug!("Split {n} rows into {} train / {} test (seed {seed})", train.len(), test.len());
    TrainTestSplit { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rounds_up() {
        let split = train_test_split(357, 0.2, 42);
        assert_eq!(split.test.len(), 72);
        assert_eq!(split.train.len(), 285);

        let split = train_test_split(10, 0.2, 42);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn partitions_are_disjoint_and_cover_all_rows() {
        let split = train_test_split(50, 0.3, 1);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_partition() {
        assert_eq!(train_test_split(100, 0.2, 42), train_test_split(100, 0.2, 42));
        assert_ne!(train_test_split(100, 0.2, 42), train_test_split(100, 0.2, 43));
    }
}
