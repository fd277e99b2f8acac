//! Pure document logic with no file system access.
//!
//! - `value`   – the value model: kinds, coercion, numeric widening.
//! - `path`    – slash-delimited lookups and writes into nested objects.
//! - `version` – the config-version comparator and reset policy.

pub mod path;
pub mod value;
pub mod version;

pub use path::{BlockReason, PathBlock, PathOutcome};
pub use value::{Document, ValueKind};
pub use version::{VersionPolicy, VERSION_KEY};
