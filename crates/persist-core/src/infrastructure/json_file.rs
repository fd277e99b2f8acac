//! JSON file adapter: the only place that touches the file system.
//!
//! Documents are written pretty-printed (two-space indent) with keys in
//! insertion order.  Writes replace the whole file; there is no temp-file
//! rename, so a process killed mid-write can leave a truncated file behind.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::value::Document;
use crate::error::{StoreError, StoreResult};

/// Returns `true` if `path` exists.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Creates `dir` and any missing parents.  Succeeds if it already exists.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> StoreResult<()> {
    std::fs::create_dir_all(dir).map_err(StoreError::io(dir))
}

/// Reads and parses `path` into any deserializable type.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Parse`] if it is not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let content = std::fs::read_to_string(path).map_err(StoreError::io(path))?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `path` as a [`Document`].
///
/// # Errors
///
/// As [`read_json`], plus [`StoreError::NotAnObject`] when the file holds
/// valid JSON whose root is not an object.
pub fn read_document(path: &Path) -> StoreResult<Document> {
    match read_json::<Value>(path)? {
        Value::Object(doc) => {
            debug!(path = %path.display(), keys = doc.len(), "read document");
            Ok(doc)
        }
        _ => Err(StoreError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Serializes `value` as pretty JSON and writes it to `path`.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] or [`StoreError::Io`].
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(StoreError::io(path))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// Writes a whole [`Document`] to `path`.
///
/// # Errors
///
/// As [`write_json`].
pub fn write_document(path: &Path, doc: &Document) -> StoreResult<()> {
    write_json(path, doc)
}
