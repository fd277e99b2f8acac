//! The config store: `config.json`, typed lookups and path-addressed writes.
//!
//! On first open the file is created from the application's defaults.  Every
//! write loads the whole document, changes one entry and rewrites the whole
//! file.  Reads may be served from a [`DocumentCache`] chosen through
//! [`ConfigOptions::cache`].
//!
//! ```no_run
//! use persist_core::{ConfigOptions, ConfigStore, Document, ValueKind};
//! use serde_json::json;
//!
//! let mut defaults = Document::new();
//! defaults.insert("config_version".into(), json!(1));
//! defaults.insert("window".into(), json!({ "width": 800 }));
//!
//! let mut config = ConfigStore::open("/tmp/.my-app", defaults, ConfigOptions::default())?;
//! config.set_by_path("window/width", &1024)?.require()?;
//! let width = config.get_by_path("window/width", ValueKind::Float)?;
//! assert_eq!(width, Some(json!(1024.0)));
//! # Ok::<(), persist_core::StoreError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::path::{self, PathOutcome};
use crate::domain::value::{self, Document, ValueKind};
use crate::domain::version::{self, VersionPolicy, VERSION_KEY};
use crate::error::{StoreError, StoreResult};
use crate::infrastructure::cache::{CachePolicy, DocumentCache};
use crate::infrastructure::json_file;

/// File name of the configuration document inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Construction-time settings for a [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigOptions {
    /// Whether reads are served from memory after the first load.
    pub cache: CachePolicy,
    /// What to do when the defaults declare a different `config_version`.
    pub versioning: VersionPolicy,
}

/// Typed, path-addressed access to `config.json`.
#[derive(Debug)]
pub struct ConfigStore {
    dir: PathBuf,
    file: PathBuf,
    defaults: Document,
    cache: Box<dyn DocumentCache>,
}

impl ConfigStore {
    /// Opens the config store in `dir`.
    ///
    /// Writes `defaults` to `config.json` if the file does not exist.  Then,
    /// under [`VersionPolicy::ResetOnMismatch`], replaces the file with
    /// `defaults` when their `config_version` differs from the stored one.
    ///
    /// # Errors
    ///
    /// - [`StoreError::TypeMismatch`] if the stored `config_version` is not
    ///   an integer.
    /// - [`StoreError::Parse`] / [`StoreError::NotAnObject`] if the existing
    ///   file is malformed.
    /// - [`StoreError::Io`] on file system failures.
    pub fn open(dir: impl Into<PathBuf>, defaults: Document, options: ConfigOptions) -> StoreResult<Self> {
        let dir = dir.into();
        let file = dir.join(CONFIG_FILE_NAME);
        let mut store = Self {
            dir,
            file,
            defaults,
            cache: options.cache.build(),
        };

        if !json_file::exists(&store.file) {
            info!(path = %store.file.display(), "creating config file from defaults");
            json_file::write_document(&store.file, &store.defaults)?;
        }

        let stored = store.config_version()?;
        let declared = version::declared_version(&store.defaults);
        if version::needs_reset(options.versioning, declared, stored) {
            info!(
                path = %store.file.display(),
                stored = ?stored,
                declared = ?declared,
                "config version changed; resetting to defaults"
            );
            store.reset_to_defaults()?;
        }

        debug!(cache = store.cache.name(), "config store ready");
        Ok(store)
    }

    /// Directory holding `config.json`.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of `config.json`.
    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// The defaults this store was opened with.
    pub fn defaults(&self) -> &Document {
        &self.defaults
    }

    /// Returns the current document.
    ///
    /// With a read-through cache, only the first call touches the disk.
    ///
    /// # Errors
    ///
    /// [`StoreError::Parse`] for malformed JSON, [`StoreError::Io`] if the
    /// file cannot be read.
    pub fn get_document(&mut self) -> StoreResult<Document> {
        if let Some(doc) = self.cache.get() {
            debug!("config served from cache");
            return Ok(doc.clone());
        }
        let doc = json_file::read_document(&self.file)?;
        self.cache.store(&doc);
        Ok(doc)
    }

    /// Looks up a top-level `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::TypeMismatch`] when the value is present but does not
    /// match `kind`; read errors as for [`get_document`](Self::get_document).
    pub fn get_value(&mut self, key: &str, kind: ValueKind) -> StoreResult<Option<Value>> {
        let doc = self.get_document()?;
        match doc.get(key) {
            None => Ok(None),
            Some(v) if kind.accepts(v) => Ok(Some(v.clone())),
            Some(v) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
                expected: kind,
                found: ValueKind::of(v),
            }),
        }
    }

    /// Looks up a slash-delimited `path`.
    ///
    /// Integers widen to floats when `kind` is [`ValueKind::Float`], except at
    /// the root: a single-segment path must match `kind` exactly and a
    /// mismatch there is an error, whereas deeper paths only fail on a leaf
    /// mismatch and yield `None` when blocked on the way down.
    ///
    /// # Errors
    ///
    /// [`StoreError::TypeMismatch`], [`StoreError::InvalidPath`], or read
    /// errors.
    pub fn get_by_path(&mut self, path: &str, kind: ValueKind) -> StoreResult<Option<Value>> {
        let doc = self.get_document()?;
        path::lookup(&doc, path, kind)
    }

    /// Reads the stored `config_version`.
    ///
    /// # Errors
    ///
    /// [`StoreError::TypeMismatch`] if it is present but not an integer.
    pub fn config_version(&mut self) -> StoreResult<Option<i64>> {
        Ok(self
            .get_value(VERSION_KEY, ValueKind::Integer)?
            .and_then(|v| v.as_i64()))
    }

    /// Stores `value` under the top-level `key` and rewrites the file.
    ///
    /// `null` is stored as the string `"null"`; every other JSON value is
    /// stored as is.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialize`] if `value` cannot be represented as JSON,
    /// plus read/write errors.
    pub fn set_value<V: Serialize + ?Sized>(&mut self, key: &str, value: &V) -> StoreResult<()> {
        let stored = value::to_stored(value)?;
        let mut doc = self.get_document()?;
        doc.insert(key.to_string(), stored);
        self.commit(&doc)?;
        debug!(%key, "config value set");
        Ok(())
    }

    /// Stores the string representation of `value` under `key`.
    ///
    /// # Errors
    ///
    /// As [`set_value`](Self::set_value).
    pub fn set_display_value(&mut self, key: &str, value: impl fmt::Display) -> StoreResult<()> {
        self.set_value(key, &value.to_string())
    }

    /// Stores `value` at `path`, descending through existing objects only.
    ///
    /// A blocked descent writes nothing and returns
    /// [`PathOutcome::Blocked`]; call [`PathOutcome::require`] on the result
    /// to treat that as an error.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidPath`], [`StoreError::Serialize`], plus
    /// read/write errors.
    pub fn set_by_path<V: Serialize + ?Sized>(&mut self, path: &str, value: &V) -> StoreResult<PathOutcome> {
        let stored = value::to_stored(value)?;
        let mut doc = self.get_document()?;
        let outcome = path::assign(&mut doc, path, stored)?;
        match &outcome {
            PathOutcome::Written => {
                self.commit(&doc)?;
                debug!(%path, "config path set");
            }
            PathOutcome::Blocked(block) => debug!(%block, "config path write skipped"),
        }
        Ok(outcome)
    }

    /// Replaces the whole file with the defaults.
    ///
    /// This does not merge: every key the defaults do not declare is lost.
    /// The cache is refreshed with the defaults rather than bypassed, so a
    /// read-through store never serves the pre-reset document.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] or [`StoreError::Serialize`].
    pub fn reset_to_defaults(&mut self) -> StoreResult<()> {
        json_file::write_document(&self.file, &self.defaults)?;
        self.cache.store(&self.defaults);
        Ok(())
    }

    fn commit(&mut self, doc: &Document) -> StoreResult<()> {
        json_file::write_document(&self.file, doc)?;
        self.cache.store(doc);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
