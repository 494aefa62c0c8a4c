//! Forest representation: trees and the ensemble built from them.
//!
//! Trees are stored structure-of-arrays for cache-friendly traversal, and
//! both [`Tree`] and [`RandomForest`] derive `serde` so the whole ensemble
//! can be carried by the artifact codec unchanged.
//!
//! Missing feature values (`f32::NAN`) follow each node's default direction
//! during traversal.

mod ensemble;
mod tree;

pub use ensemble::RandomForest;
pub use tree::{MutableTree, Tree, TreeValidationError};
