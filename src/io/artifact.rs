//! Binary artifact format.
//!
//! An artifact is a 16-byte header followed by a Postcard-encoded payload:
//!
//! ```text
//! offset  size  field
//! 0       4     magic "PFRF"
//! 4       1     format version, major
//! 5       1     format version, minor
//! 6       1     artifact kind (0 = model, 1 = feature list)
//! 7       1     reserved (zero)
//! 8       8     payload length, u64 little-endian
//! ```
//!
//! The kind byte keeps the two artifacts from being swapped at load time;
//! beyond that the payload is opaque and compatibility is the caller's
//! responsibility.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::forest::RandomForest;

/// Magic bytes identifying a priceforest artifact.
pub const MAGIC: &[u8; 4] = b"PFRF";

/// Current format version (major).
pub const VERSION_MAJOR: u8 = 1;

/// Current format version (minor).
pub const VERSION_MINOR: u8 = 0;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Artifact kind stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArtifactKind {
    /// Serialized [`RandomForest`].
    Model = 0,
    /// Serialized ordered feature-name list.
    FeatureList = 1,
}

impl ArtifactKind {
    /// Convert from the header byte, returning `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Model),
            1 => Some(Self::FeatureList),
            _ => None,
        }
    }
}

/// Errors raised while writing an artifact.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] postcard::Error),
}

/// Errors raised while reading an artifact.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a priceforest artifact (bad magic)")]
    BadMagic,

    #[error("unsupported format version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("unknown artifact kind byte {0}")]
    UnknownKind(u8),

    #[error("expected {expected:?} artifact, found {found:?}")]
    WrongKind {
        expected: ArtifactKind,
        found: ArtifactKind,
    },

    #[error("truncated payload: header declares {declared} bytes, file holds {actual}")]
    TruncatedPayload { declared: u64, actual: u64 },

    #[error("decoding error: {0}")]
    Decoding(#[from] postcard::Error),
}

/// Write the trained model artifact.
pub fn save_model(path: impl AsRef<Path>, model: &RandomForest) -> Result<(), SaveError> {
    save_artifact(path, ArtifactKind::Model, model)
}

/// Load the trained model artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<RandomForest, LoadError> {
    load_artifact(path, ArtifactKind::Model)
}

/// Write the ordered feature-name list artifact.
pub fn save_feature_list(path: impl AsRef<Path>, features: &[String]) -> Result<(), SaveError> {
    save_artifact(path, ArtifactKind::FeatureList, &features.to_vec())
}

/// Load the ordered feature-name list artifact.
pub fn load_feature_list(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    load_artifact(path, ArtifactKind::FeatureList)
}

fn save_artifact<T: Serialize>(
    path: impl AsRef<Path>,
    kind: ArtifactKind,
    payload: &T,
) -> Result<(), SaveError> {
    let payload_bytes = postcard::to_allocvec(payload)?;

    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = VERSION_MAJOR;
    header[5] = VERSION_MINOR;
    header[6] = kind as u8;
    header[8..16].copy_from_slice(&(payload_bytes.len() as u64).to_le_bytes());

    let mut file = File::create(path)?;
    file.write_all(&header)?;
    file.write_all(&payload_bytes)?;
    file.flush()?;
    Ok(())
}

fn load_artifact<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    expected: ArtifactKind,
) -> Result<T, LoadError> {
    let mut file = File::open(path)?;

    let mut header = [0u8; HEADER_SIZE];
    file.read_exact(&mut header)
        .map_err(|_| LoadError::BadMagic)?;

    if &header[0..4] != MAGIC {
        return Err(LoadError::BadMagic);
    }
    let (major, minor) = (header[4], header[5]);
    if major != VERSION_MAJOR {
        return Err(LoadError::UnsupportedVersion { major, minor });
    }
    let found = ArtifactKind::from_u8(header[6]).ok_or(LoadError::UnknownKind(header[6]))?;
    if found != expected {
        return Err(LoadError::WrongKind { expected, found });
    }

    let declared = u64::from_le_bytes(header[8..16].try_into().unwrap());
    let mut payload = Vec::new();
    file.read_to_end(&mut payload)?;
    if (payload.len() as u64) < declared {
        return Err(LoadError::TruncatedPayload {
            declared,
            actual: payload.len() as u64,
        });
    }

    Ok(postcard::from_bytes(&payload[..declared as usize])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::MutableTree;
    use std::fs;

    fn tiny_forest() -> RandomForest {
        let mut tree = MutableTree::new();
        let root = tree.push_split(0, 2.0, true);
        let l = tree.push_leaf(10.0);
        let r = tree.push_leaf(20.0);
        tree.set_children(root, l, r);
        RandomForest::new(vec![tree.freeze()], 1)
    }

    #[test]
    fn model_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let forest = tiny_forest();
        save_model(&path, &forest).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.n_trees(), 1);
        assert_eq!(loaded.n_features(), 1);
        assert_eq!(loaded.predict_row(&[1.0]), forest.predict_row(&[1.0]));
        assert_eq!(loaded.predict_row(&[3.0]), forest.predict_row(&[3.0]));
    }

    #[test]
    fn feature_list_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.bin");

        let features = vec!["OverallQual".to_string(), "GrLivArea".to_string()];
        save_feature_list(&path, &features).unwrap();
        assert_eq!(load_feature_list(&path).unwrap(), features);
    }

    #[test]
    fn kind_byte_prevents_artifact_swaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.bin");
        save_feature_list(&path, &["a".to_string()]).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::WrongKind {
                expected: ArtifactKind::Model,
                found: ArtifactKind::FeatureList,
            }
        ));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        fs::write(&path, b"definitely not an artifact").unwrap();
        assert!(matches!(load_model(&path).unwrap_err(), LoadError::BadMagic));
    }

    #[test]
    fn short_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        fs::write(&path, b"PFRF").unwrap();
        assert!(matches!(load_model(&path).unwrap_err(), LoadError::BadMagic));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        save_model(&path, &tiny_forest()).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();

        assert!(matches!(
            load_model(&path).unwrap_err(),
            LoadError::TruncatedPayload { .. }
        ));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        save_model(&path, &tiny_forest()).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        bytes[4] = 99;
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_model(&path).unwrap_err(),
            LoadError::UnsupportedVersion { major: 99, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_model("/nonexistent/model.bin").unwrap_err(),
            LoadError::Io(_)
        ));
    }
}
