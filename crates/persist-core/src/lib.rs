//! # persist-core
//!
//! Per-application settings and UI-state storage backed by JSON files.
//!
//! An application opens an [`AppPersistence`] once at startup.  It owns a
//! directory `~/.{app_name}` (or any base directory the caller picks) with:
//!
//! - **`config.json`** – the [`ConfigStore`]: versioned settings created from
//!   application defaults, read with type checks, addressed by key or by
//!   slash-delimited path (`"window/main/width"`).
//! - **`state.json`** – the [`StateStore`]: untyped UI state such as the last
//!   opened tab or a list of recent files.
//! - **`geometry/`** – one file per saved window geometry, stored as base64.
//!
//! Access is single-process and synchronous.  Each write rewrites a whole
//! file; there is no locking and no crash-safe rename.

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod store;

pub use domain::path::{BlockReason, PathBlock, PathOutcome};
pub use domain::value::{Document, ValueKind};
pub use domain::version::{VersionPolicy, VERSION_KEY};
pub use error::{StoreError, StoreResult};
pub use infrastructure::cache::CachePolicy;
pub use store::config::{ConfigOptions, ConfigStore};
pub use store::persistence::{AppPersistence, PersistenceOptions};
pub use store::state::StateStore;
