//! Decision tree storage and construction.
//!
//! [`Tree`] is the immutable structure-of-arrays form used for inference and
//! serialization. [`MutableTree`] is the construction API used by the grower:
//! split nodes are pushed with placeholder children, the subtrees are grown,
//! and the child links are patched afterwards.

use serde::{Deserialize, Serialize};

/// Sentinel child index for a split node whose subtrees are not grown yet.
const UNSET: u32 = u32::MAX;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node {node} has child index {child} out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds { node: u32, child: u32, n_nodes: usize },

    #[error("split node {node} has an unset child link")]
    UnsetChild { node: u32 },
}

/// A regression tree in structure-of-arrays form.
///
/// Child indices are local to the tree, with node 0 as the root. For leaf
/// nodes only `leaf_value` is meaningful; for split nodes only the split
/// fields and child links are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Split feature index per node.
    split_index: Vec<u32>,
    /// Split threshold per node (go left if value < threshold).
    threshold: Vec<f32>,
    /// Left child per node.
    left: Vec<u32>,
    /// Right child per node.
    right: Vec<u32>,
    /// Direction for missing values (true = left).
    default_left: Vec<bool>,
    /// Whether each node is a leaf.
    is_leaf: Vec<bool>,
    /// Leaf prediction per node (valid for leaf nodes).
    leaf_value: Vec<f32>,
}

impl Tree {
    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    /// Check that every child link points inside the tree.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        if self.is_leaf.is_empty() {
            return Err(TreeValidationError::Empty);
        }
        let n_nodes = self.n_nodes();
        for node in 0..n_nodes as u32 {
            if self.is_leaf[node as usize] {
                continue;
            }
            for child in [self.left[node as usize], self.right[node as usize]] {
                if child == UNSET {
                    return Err(TreeValidationError::UnsetChild { node });
                }
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        child,
                        n_nodes,
                    });
                }
            }
        }
        Ok(())
    }

    /// Traverse from the root to a leaf for one row of features.
    ///
    /// Values outside the feature range and NaN both follow the node's
    /// default direction.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        let mut node = 0usize;
        while !self.is_leaf[node] {
            let value = features
                .get(self.split_index[node] as usize)
                .copied()
                .unwrap_or(f32::NAN);
            let go_left = if value.is_nan() {
                self.default_left[node]
            } else {
                value < self.threshold[node]
            };
            node = if go_left {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        self.leaf_value[node]
    }
}

/// Mutable tree under construction.
///
/// The grower pushes nodes in depth-first order and patches split children
/// once both subtrees exist. [`MutableTree::freeze`] hands the finished tree
/// to inference.
#[derive(Debug, Default)]
pub struct MutableTree {
    split_index: Vec<u32>,
    threshold: Vec<f32>,
    left: Vec<u32>,
    right: Vec<u32>,
    default_left: Vec<bool>,
    is_leaf: Vec<bool>,
    leaf_value: Vec<f32>,
}

impl MutableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes pushed so far.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Append a leaf node and return its index.
    pub fn push_leaf(&mut self, value: f32) -> u32 {
        let id = self.n_nodes() as u32;
        self.split_index.push(0);
        self.threshold.push(0.0);
        self.left.push(UNSET);
        self.right.push(UNSET);
        self.default_left.push(true);
        self.is_leaf.push(true);
        self.leaf_value.push(value);
        id
    }

    /// Append a split node with unset children and return its index.
    pub fn push_split(&mut self, feature: u32, threshold: f32, default_left: bool) -> u32 {
        let id = self.n_nodes() as u32;
        self.split_index.push(feature);
        self.threshold.push(threshold);
        self.left.push(UNSET);
        self.right.push(UNSET);
        self.default_left.push(default_left);
        self.is_leaf.push(false);
        self.leaf_value.push(0.0);
        id
    }

    /// Patch the child links of a split node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is a leaf.
    pub fn set_children(&mut self, node: u32, left: u32, right: u32) {
        assert!(!self.is_leaf[node as usize], "cannot set children of a leaf");
        self.left[node as usize] = left;
        self.right[node as usize] = right;
    }

    /// Convert into the immutable inference form.
    pub fn freeze(self) -> Tree {
        Tree {
            split_index: self.split_index,
            threshold: self.threshold,
            left: self.left,
            right: self.right,
            default_left: self.default_left,
            is_leaf: self.is_leaf,
            leaf_value: self.leaf_value,
        }
    }
}
