//! Configuration versioning.
//!
//! A configuration document may carry an integer under [`VERSION_KEY`].  When
//! the defaults an application ships declare a different version than the
//! file on disk, the [`VersionPolicy`] decides whether the whole file is
//! replaced by the defaults.  Nothing is merged: a reset is a factory reset.

use serde_json::Value;

use crate::domain::value::Document;

/// Reserved key holding the configuration schema version.
pub const VERSION_KEY: &str = "config_version";

/// What to do when the declared and stored versions disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPolicy {
    /// Leave the file on disk alone.
    #[default]
    KeepExisting,
    /// Replace the whole file with the defaults.
    ResetOnMismatch,
}

/// Returns the version declared by `defaults`, if any.  `null` counts as
/// undeclared.
pub fn declared_version(defaults: &Document) -> Option<&Value> {
    defaults.get(VERSION_KEY).filter(|v| !v.is_null())
}

/// Decides whether a store must be reset to its defaults.
///
/// A reset happens only under [`VersionPolicy::ResetOnMismatch`], only when
/// the defaults declare a version, and only when that version differs from
/// the stored one (an absent stored version counts as different).
pub fn needs_reset(policy: VersionPolicy, declared: Option<&Value>, stored: Option<i64>) -> bool {
    if policy != VersionPolicy::ResetOnMismatch {
        return false;
    }
    match declared {
        None => false,
        Some(declared) => stored.map(Value::from).as_ref() != Some(declared),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keep_existing_never_resets() {
        assert!(!needs_reset(VersionPolicy::KeepExisting, Some(&json!(3)), Some(2)));
    }

    #[test]
    fn test_reset_on_mismatch_resets_when_versions_differ() {
        assert!(needs_reset(VersionPolicy::ResetOnMismatch, Some(&json!(3)), Some(2)));
    }

    #[test]
    fn test_reset_on_mismatch_keeps_equal_versions() {
        assert!(!needs_reset(VersionPolicy::ResetOnMismatch, Some(&json!(2)), Some(2)));
    }

    #[test]
    fn test_missing_declared_version_never_resets() {
        assert!(!needs_reset(VersionPolicy::ResetOnMismatch, None, Some(2)));
    }

    #[test]
    fn test_missing_stored_version_resets() {
        assert!(needs_reset(VersionPolicy::ResetOnMismatch, Some(&json!(1)), None));
    }

    #[test]
    fn test_declared_version_ignores_null() {
        let mut defaults = Document::new();
        defaults.insert(VERSION_KEY.to_string(), Value::Null);
        assert_eq!(declared_version(&defaults), None);

        defaults.insert(VERSION_KEY.to_string(), json!(4));
        assert_eq!(declared_version(&defaults), Some(&json!(4)));
    }
}
