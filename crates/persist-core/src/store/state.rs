//! The state store: `state.json` for UI state plus one file per saved
//! window geometry under `geometry/`.
//!
//! Unlike the config store there is no cache and no type checking: every
//! call reads the file again and values come back exactly as stored.
//!
//! Geometry blobs come from the host GUI toolkit and are never interpreted
//! here.  They are kept as base64 text in `geometry/{name}.json`:
//!
//! ```json
//! {
//!   "geometry": "AdnQywADAAAAAAAA..."
//! }
//! ```

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::value::{self, Document};
use crate::error::{StoreError, StoreResult};
use crate::infrastructure::json_file;

/// File name of the state document inside the app directory.
pub const STATE_FILE_NAME: &str = "state.json";

/// Directory (inside the app directory) holding geometry records.
pub const GEOMETRY_DIR_NAME: &str = "geometry";

/// On-disk shape of a geometry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GeometryRecord {
    geometry: String,
}

/// Untyped key/value UI state and named geometry blobs.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Creates a state store rooted at `dir`.  Nothing is touched on disk
    /// until the first call.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of `state.json`.
    pub fn state_file(&self) -> PathBuf {
        self.dir.join(STATE_FILE_NAME)
    }

    /// Directory holding the geometry records.
    pub fn geometry_dir(&self) -> PathBuf {
        self.dir.join(GEOMETRY_DIR_NAME)
    }

    /// Returns the value stored under `key`.
    ///
    /// When the key is absent and `default` is given, the default is written
    /// to the file and returned.  That write is best effort: a failure is
    /// logged and the default is still returned.  Without a default (or with
    /// a `null` one) an absent key yields `Ok(None)` and nothing is written.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if `state.json` cannot be created or read,
    /// [`StoreError::Parse`] / [`StoreError::NotAnObject`] if it is malformed.
    pub fn get_value(&self, key: &str, default: Option<Value>) -> StoreResult<Option<Value>> {
        let file = self.state_file();
        if !json_file::exists(&file) {
            debug!(path = %file.display(), "creating empty state file");
            json_file::write_document(&file, &Document::new())?;
        }

        let mut doc = json_file::read_document(&file)?;
        if let Some(v) = doc.get(key) {
            return Ok(Some(v.clone()));
        }

        let Some(default) = default.filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        let default = value::coerce(default);
        doc.insert(key.to_string(), default.clone());
        if let Err(e) = json_file::write_document(&file, &doc) {
            warn!(%key, error = %e, "could not persist state default");
        }
        Ok(Some(default))
    }

    /// Stores `value` under `key`, creating `state.json` if needed.
    ///
    /// Values are coerced as in the config store: `null` becomes `"null"`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialize`] plus read/write errors.
    pub fn set_value<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> StoreResult<()> {
        let file = self.state_file();
        let stored = value::to_stored(value)?;
        let mut doc = if json_file::exists(&file) {
            json_file::read_document(&file)?
        } else {
            Document::new()
        };
        doc.insert(key.to_string(), stored);
        json_file::write_document(&file, &doc)?;
        debug!(%key, "state value set");
        Ok(())
    }

    /// Saves an opaque geometry blob under `name`.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidName`] for an empty name or one containing a
    /// path separator, [`StoreError::Io`] on write failure.
    pub fn save_geometry(&self, name: &str, geometry: &[u8]) -> StoreResult<()> {
        let file = self.geometry_file(name)?;
        json_file::ensure_dir(&self.geometry_dir())?;
        let record = GeometryRecord {
            geometry: STANDARD.encode(geometry),
        };
        json_file::write_json(&file, &record)?;
        debug!(%name, bytes = geometry.len(), "geometry saved");
        Ok(())
    }

    /// Loads the geometry blob saved under `name`, or `Ok(None)` if none was
    /// saved.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidName`], [`StoreError::GeometryDecode`] if the
    /// record is not valid base64, plus read errors.
    pub fn get_geometry(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let file = self.geometry_file(name)?;
        if !json_file::exists(&file) {
            return Ok(None);
        }
        let record: GeometryRecord = json_file::read_json(&file)?;
        let bytes = STANDARD
            .decode(record.geometry.as_bytes())
            .map_err(|source| StoreError::GeometryDecode {
                name: name.to_string(),
                source,
            })?;
        Ok(Some(bytes))
    }

    fn geometry_file(&self, name: &str) -> StoreResult<PathBuf> {
        let invalid = name.trim().is_empty()
            || name.contains(|c: char| c == '/' || c == '\\')
            || name == "."
            || name == "..";
        if invalid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.geometry_dir().join(format!("{name}.json")))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
