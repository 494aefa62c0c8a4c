//! Depth-wise tree growing with exact greedy splits.
//!
//! Each node scans every feature: the node's rows are sorted by feature
//! value and a prefix-sum sweep evaluates every boundary between distinct
//! values, scoring candidates by variance reduction (sum-of-squared-error
//! gain). Missing values sort below all finite values and follow the left
//! child, matching tree traversal at inference time.

use crate::data::ColMatrix;
use crate::forest::{MutableTree, Tree};

use super::params::RandomForestParams;

/// Best split found for a node.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: u32,
    threshold: f32,
    gain: f64,
}

/// Grows a single regression tree over a fixed dataset.
///
/// The grower borrows the full training matrix; the rows a tree actually
/// sees are whatever index set the caller passes in (for bagging, a
/// bootstrap sample with duplicates).
pub struct TreeGrower<'a> {
    data: &'a ColMatrix,
    targets: &'a [f32],
    params: &'a RandomForestParams,
}

impl<'a> TreeGrower<'a> {
    pub fn new(data: &'a ColMatrix, targets: &'a [f32], params: &'a RandomForestParams) -> Self {
        debug_assert_eq!(data.n_rows(), targets.len());
        Self {
            data,
            targets,
            params,
        }
    }

    /// Grow a tree over the given row multiset.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty.
    pub fn grow(&self, mut rows: Vec<u32>) -> Tree {
        assert!(!rows.is_empty(), "cannot grow a tree from zero rows");
        let mut tree = MutableTree::new();
        self.grow_node(&mut tree, &mut rows, 0);
        tree.freeze()
    }

    /// Grow the subtree for `rows`, returning the new node's index.
    fn grow_node(&self, tree: &mut MutableTree, rows: &mut [u32], depth: u32) -> u32 {
        let (n, sum, sum_sq) = self.node_stats(rows);
        let mean = (sum / n) as f32;
        let sse = sum_sq - sum * sum / n;

        if depth >= self.params.max_depth
            || rows.len() < self.params.min_samples_split as usize
            || sse <= 1e-12
        {
            return tree.push_leaf(mean);
        }

        let Some(split) = self.best_split(rows, sse) else {
            return tree.push_leaf(mean);
        };

        let mid = partition_rows(rows, self.data.col_slice(split.feature as usize), split.threshold);
        if mid == 0 || mid == rows.len() {
            // Float midpoint collapsed onto an existing value; no usable cut.
            return tree.push_leaf(mean);
        }

        let node = tree.push_split(split.feature, split.threshold, true);
        let (left_rows, right_rows) = rows.split_at_mut(mid);
        let left = self.grow_node(tree, left_rows, depth + 1);
        let right = self.grow_node(tree, right_rows, depth + 1);
        tree.set_children(node, left, right);
        node
    }

    /// Count, sum, and sum of squares of the targets in `rows`.
    fn node_stats(&self, rows: &[u32]) -> (f64, f64, f64) {
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &row in rows {
            let t = self.targets[row as usize] as f64;
            sum += t;
            sum_sq += t * t;
        }
        (rows.len() as f64, sum, sum_sq)
    }

    /// Exhaustive split search across all features.
    ///
    /// Returns `None` when no boundary satisfies the leaf-size constraints
    /// or improves on the parent's SSE.
    fn best_split(&self, rows: &[u32], parent_sse: f64) -> Option<SplitCandidate> {
        let n = rows.len();
        let min_leaf = self.params.min_samples_leaf as usize;
        let mut best: Option<SplitCandidate> = None;

        let (_, total_sum, total_sum_sq) = self.node_stats(rows);

        let mut pairs: Vec<(f32, f32)> = Vec::with_capacity(n);
        for feature in 0..self.data.n_cols() {
            let column = self.data.col_slice(feature);

            pairs.clear();
            pairs.extend(rows.iter().map(|&row| {
                let v = column[row as usize];
                // NaN sorts below every finite value and goes left.
                let key = if v.is_nan() { f32::NEG_INFINITY } else { v };
                (key, self.targets[row as usize])
            }));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0f64;
            let mut left_sum_sq = 0.0f64;

            for i in 1..n {
                let t = pairs[i - 1].1 as f64;
                left_sum += t;
                left_sum_sq += t * t;

                if pairs[i].0 <= pairs[i - 1].0 {
                    continue;
                }
                if i < min_leaf || n - i < min_leaf {
                    continue;
                }

                let left_n = i as f64;
                let right_n = (n - i) as f64;
                let right_sum = total_sum - left_sum;
                let right_sum_sq = total_sum_sq - left_sum_sq;

                let left_sse = left_sum_sq - left_sum * left_sum / left_n;
                let right_sse = right_sum_sq - right_sum * right_sum / right_n;
                let gain = parent_sse - (left_sse + right_sse);

                if gain > best.map_or(0.0, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature: feature as u32,
                        threshold: midpoint(pairs[i - 1].0, pairs[i].0),
                        gain,
                    });
                }
            }
        }

        best
    }
}

/// Midpoint between two adjacent sorted feature values.
fn midpoint(lower: f32, upper: f32) -> f32 {
    if lower == f32::NEG_INFINITY {
        // Boundary between missing and finite values: any threshold at or
        // below the smallest finite value separates them, since NaN always
        // goes left and finite values compare against the threshold.
        upper
    } else {
        lower + (upper - lower) / 2.0
    }
}

/// Partition `rows` in place so rows going left precede rows going right.
///
/// Returns the number of left rows. Uses the same predicate as tree
/// traversal: NaN goes left, otherwise `value < threshold`.
fn partition_rows(rows: &mut [u32], column: &[f32], threshold: f32) -> usize {
    let mut i = 0;
    let mut j = rows.len();
    while i < j {
        let v = column[rows[i] as usize];
        if v.is_nan() || v < threshold {
            i += 1;
        } else {
            j -= 1;
            rows.swap(i, j);
        }
    }
    i
}
