//! Artifact persistence.
//!
//! Training produces two artifacts — the model and the feature list — and
//! the server loads them back. Both use the same on-disk format defined in
//! [`artifact`].

pub mod artifact;

pub use artifact::{
    load_feature_list, load_model, save_feature_list, save_model, ArtifactKind, LoadError,
    SaveError,
};
