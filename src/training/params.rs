//! Training parameters.

/// Parameters for random forest training.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestParams {
    /// Number of trees in the ensemble.
    pub n_trees: u32,
    /// Maximum tree depth (root is depth 0).
    pub max_depth: u32,
    /// Minimum number of rows a node needs to be considered for splitting.
    pub min_samples_split: u32,
    /// Minimum number of rows each child of a split must keep.
    pub min_samples_leaf: u32,
    /// Base seed; tree `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self {
            n_trees: 500,
            max_depth: 20,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}
