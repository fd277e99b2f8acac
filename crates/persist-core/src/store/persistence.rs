//! The persistence facade: one directory per application, holding both
//! stores.
//!
//! ```text
//! {base_dir}/.{app_name}/
//!   config.json
//!   state.json
//!   geometry/{name}.json
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::value::Document;
use crate::error::{StoreError, StoreResult};
use crate::infrastructure::json_file;
use crate::store::config::{ConfigOptions, ConfigStore};
use crate::store::state::StateStore;

/// Where and how the application directory is opened.
#[derive(Debug, Clone, Default)]
pub struct PersistenceOptions {
    /// Parent of the `.{app_name}` directory.  `None` means the user's home
    /// directory.
    pub base_dir: Option<PathBuf>,
    /// Options forwarded to the config store.
    pub config: ConfigOptions,
}

/// The paired config and state stores of one application.
#[derive(Debug)]
pub struct AppPersistence {
    root: PathBuf,
    pub state: StateStore,
    pub config: ConfigStore,
}

impl AppPersistence {
    /// Opens (creating if needed) `{base_dir}/.{app_name}` and both stores
    /// inside it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NoHomeDirectory`] when no base directory is given and
    ///   the home directory cannot be determined.
    /// - [`StoreError::Io`] if the directory cannot be created.
    /// - Any error from [`ConfigStore::open`].
    pub fn open(app_name: &str, defaults: Document, options: PersistenceOptions) -> StoreResult<Self> {
        let base = match options.base_dir {
            Some(dir) => dir,
            None => dirs::home_dir().ok_or(StoreError::NoHomeDirectory)?,
        };
        let root = app_dir(&base, app_name);
        json_file::ensure_dir(&root)?;
        info!(root = %root.display(), "opening app persistence");

        let state = StateStore::new(&root);
        let config = ConfigStore::open(&root, defaults, options.config)?;
        Ok(Self { root, state, config })
    }

    /// The `.{app_name}` directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Returns `base/.{app_name}`.
pub fn app_dir(base: &Path, app_name: &str) -> PathBuf {
    base.join(format!(".{app_name}"))
}
