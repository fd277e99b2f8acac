//! Infrastructure: file-system adapters and cache strategies.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by the `domain` layer.

pub mod cache;
pub mod json_file;

pub use cache::{CachePolicy, DocumentCache};
