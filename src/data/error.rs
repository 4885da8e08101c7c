use std::path::{Path, PathBuf};

/// Why a sensor file could not be turned into a [`Dataset`](super::model::Dataset).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File missing, unreadable, or not a structured array file.
    #[error("cannot read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// Expected arrays missing, mismatched, or holding unusable values.
    #[error("invalid sensor data in {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn io(path: &Path, reason: impl Into<String>) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn schema(path: &Path, reason: impl Into<String>) -> Self {
        LoadError::Schema {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
