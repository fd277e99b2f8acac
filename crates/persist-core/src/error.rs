//! Error type shared by every store in this crate.
//!
//! Absent keys are **not** errors: lookups return `Ok(None)` so callers can
//! tell "missing" apart from "present but of the wrong type".

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::path::PathBlock;
use crate::domain::value::ValueKind;

/// Errors produced by the config store, the state store and the facade.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored value exists but does not have the type the caller asked for.
    #[error("value for key [{key}] is not an instance of {expected} (found {found})")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A path write could not descend through an intermediate segment.
    #[error(transparent)]
    Structural(#[from] PathBlock),

    /// The file on disk is not valid JSON.
    #[error("failed to parse JSON document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but its root is not a JSON object.
    #[error("JSON document at {path} is not an object")]
    NotAnObject { path: PathBuf },

    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value or document could not be serialized to JSON.
    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A geometry record holds text that is not valid base64.
    #[error("geometry record [{name}] is not valid base64: {source}")]
    GeometryDecode {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    /// A key path contained no non-empty segments.
    #[error("path [{0}] has no segments")]
    InvalidPath(String),

    /// A geometry name was empty or would escape the geometry directory.
    #[error("invalid geometry name [{0}]")]
    InvalidName(String),

    /// The user's home directory could not be determined.
    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

/// Convenience alias used throughout the crate.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Builds an [`StoreError::Io`] for `path`; handy inside `map_err`.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StoreError::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::path::BlockReason;

    #[test]
    fn test_type_mismatch_message_names_key_and_expected_type() {
        let err = StoreError::TypeMismatch {
            key: "width".to_string(),
            expected: ValueKind::String,
            found: ValueKind::Integer,
        };

        let msg = err.to_string();

        assert!(msg.contains("[width]"), "got: {msg}");
        assert!(msg.contains("string"), "got: {msg}");
    }

    #[test]
    fn test_structural_error_wraps_path_block_message() {
        let block = PathBlock {
            path: "a/b".to_string(),
            segment: "a".to_string(),
            reason: BlockReason::NotAnObject,
        };

        let err = StoreError::from(block.clone());

        assert_eq!(err.to_string(), block.to_string());
    }

    #[test]
    fn test_io_helper_keeps_path() {
        let make = StoreError::io("/tmp/x.json");
        let err = make(std::io::Error::new(std::io::ErrorKind::Other, "boom"));

        match err {
            StoreError::Io { path, .. } => assert_eq!(path, PathBuf::from("/tmp/x.json")),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
