//! Bootstrap row sampling for bagging.

use rand::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Samples rows with replacement for each tree in the ensemble.
///
/// Sampled indices are sorted for cache-friendly access; bagging only cares
/// about multiplicity, not order.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapSampler {
    num_rows: u32,
}

impl BootstrapSampler {
    /// Create a sampler over `num_rows` rows.
    ///
    /// # Panics
    ///
    /// Panics if `num_rows` is zero.
    pub fn new(num_rows: u32) -> Self {
        assert!(num_rows > 0, "cannot sample from an empty dataset");
        Self { num_rows }
    }

    /// Draw `num_rows` indices with replacement.
    pub fn sample(&self, seed: u64) -> Vec<u32> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut rows: Vec<u32> = (0..self.num_rows)
            .map(|_| rng.gen_range(0..self.num_rows))
            .collect();
        rows.sort_unstable();
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_size_equals_dataset_size() {
        let rows = BootstrapSampler::new(100).sample(1);
        assert_eq!(rows.len(), 100);
        assert!(rows.iter().all(|&r| r < 100));
    }

    #[test]
    fn sample_is_seed_deterministic() {
        let sampler = BootstrapSampler::new(100);
        assert_eq!(sampler.sample(5), sampler.sample(5));
        assert_ne!(sampler.sample(5), sampler.sample(6));
    }

    #[test]
    fn sample_draws_with_replacement() {
        // 1000 draws from 1000 rows without duplicates is vanishingly
        // unlikely; any duplicate proves replacement.
        let rows = BootstrapSampler::new(1000).sample(42);
        let mut deduped = rows.clone();
        deduped.dedup();
        assert!(deduped.len() < rows.len());
    }
}
