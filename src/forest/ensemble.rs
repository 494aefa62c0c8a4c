//! Random forest ensemble.

use serde::{Deserialize, Serialize};

use crate::data::ColMatrix;

use super::tree::{Tree, TreeValidationError};

/// A bagged ensemble of regression trees.
///
/// Predictions are the mean of the per-tree leaf values. The stored feature
/// arity is the contract between the model and its callers: rows handed to
/// [`RandomForest::predict_row`] must carry `n_features` values in training
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<Tree>,
    n_features: u32,
}

impl RandomForest {
    /// Assemble a forest from trained trees.
    ///
    /// # Panics
    ///
    /// Panics if `trees` is empty; an ensemble with nothing to average has
    /// no defined prediction.
    pub fn new(trees: Vec<Tree>, n_features: u32) -> Self {
        assert!(!trees.is_empty(), "a forest needs at least one tree");
        Self { trees, n_features }
    }

    /// Number of trees in the ensemble.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Feature arity the forest was trained with.
    #[inline]
    pub fn n_features(&self) -> u32 {
        self.n_features
    }

    /// Iterate over the trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Validate every tree structurally.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        self.trees.iter().try_for_each(Tree::validate)
    }

    /// Predict a single row: the mean of all tree outputs.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(features) as f64)
            .sum();
        (sum / self.trees.len() as f64) as f32
    }

    /// Predict every row of a column-major matrix.
    pub fn predict_matrix(&self, data: &ColMatrix) -> Vec<f32> {
        let mut buf = vec![0.0f32; data.n_cols()];
        (0..data.n_rows())
            .map(|row| {
                data.copy_row(row, &mut buf);
                self.predict_row(&buf)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::MutableTree;

    fn leaf_tree(value: f32) -> Tree {
        let mut tree = MutableTree::new();
        tree.push_leaf(value);
        tree.freeze()
    }

    #[test]
    fn prediction_is_mean_of_trees() {
        let forest = RandomForest::new(vec![leaf_tree(1.0), leaf_tree(3.0)], 2);
        assert_eq!(forest.predict_row(&[0.0, 0.0]), 2.0);
    }

    #[test]
    fn predict_matrix_matches_row_predictions() {
        let mut tree = MutableTree::new();
        let root = tree.push_split(0, 10.0, true);
        let l = tree.push_leaf(1.0);
        let r = tree.push_leaf(2.0);
        tree.set_children(root, l, r);
        let forest = RandomForest::new(vec![tree.freeze()], 1);

        let data = ColMatrix::from_columns(vec![vec![5.0, 15.0]]);
        assert_eq!(forest.predict_matrix(&data), vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "at least one tree")]
    fn empty_forest_is_rejected() {
        RandomForest::new(Vec::new(), 1);
    }
}
