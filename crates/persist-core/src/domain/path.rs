//! Slash-delimited key paths into nested JSON objects.
//!
//! `"window/main/width"` addresses `doc["window"]["main"]["width"]`.  Empty
//! segments are discarded, so `"/window//main/"` is the same path.
//!
//! # Lookup asymmetry
//!
//! A single-segment lookup is strict: a value of the wrong kind is a
//! [`StoreError::TypeMismatch`].  Deeper lookups are lenient on the way down
//! (a missing key or a non-object intermediate yields `None`) and strict only
//! at the leaf.  Keep it that way: callers rely on the root-level error to
//! detect corrupted top-level settings.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::domain::value::{Document, ValueKind};
use crate::error::{StoreError, StoreResult};

/// Splits `path` into its non-empty segments.
///
/// # Errors
///
/// Returns [`StoreError::InvalidPath`] when nothing is left after discarding
/// empty (or whitespace-only) segments.
pub fn segments(path: &str) -> StoreResult<Vec<&str>> {
    let segs: Vec<&str> = path.split('/').filter(|s| !s.trim().is_empty()).collect();
    if segs.is_empty() {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(segs)
}

/// Resolves `path` in `doc` and checks the result against `kind`.
///
/// Returns `Ok(None)` for a missing key anywhere on the path, and for a
/// non-object intermediate below the root.  A JSON `null` counts as missing.
///
/// # Errors
///
/// - [`StoreError::InvalidPath`] for a path without segments.
/// - [`StoreError::TypeMismatch`] when the root value of a single-segment
///   path does not match `kind`, or when the leaf of a deeper path neither
///   matches `kind` nor widens to it.
pub fn lookup(doc: &Document, path: &str, kind: ValueKind) -> StoreResult<Option<Value>> {
    let segs = segments(path)?;
    let (root, rest) = (segs[0], &segs[1..]);

    let root_value = match doc.get(root) {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let Some((leaf, parents)) = rest.split_last() else {
        if kind.accepts(root_value) {
            return Ok(Some(root_value.clone()));
        }
        return Err(mismatch(path, kind, root_value));
    };

    let Value::Object(root_map) = root_value else {
        return Ok(None);
    };
    let mut cursor = root_map;
    for seg in parents {
        match cursor.get(*seg) {
            Some(Value::Object(map)) => cursor = map,
            _ => return Ok(None),
        }
    }

    match cursor.get(*leaf) {
        None | Some(Value::Null) => Ok(None),
        Some(v) if kind.accepts(v) => Ok(Some(v.clone())),
        Some(v) => match kind.widen(v) {
            Some(widened) => Ok(Some(widened)),
            None => Err(mismatch(path, kind, v)),
        },
    }
}

fn mismatch(key: &str, expected: ValueKind, found: &Value) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: ValueKind::of(found),
    }
}

// ── Path writes ───────────────────────────────────────────────────────────────

/// Why a path write could not reach its parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The intermediate key does not exist.
    Missing,
    /// The intermediate key holds something other than an object.
    NotAnObject,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::Missing => f.write_str("not found in the document"),
            BlockReason::NotAnObject => f.write_str("is not an object"),
        }
    }
}

/// A blocked path write: which segment stopped the descent, and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path [{path}]: segment [{segment}] {reason}")]
pub struct PathBlock {
    pub path: String,
    pub segment: String,
    pub reason: BlockReason,
}

/// The result of a path write.
///
/// A blocked write is not an error by itself.  Callers that want one use
/// [`PathOutcome::require`]; callers that don't can ignore or match it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a blocked path write does nothing; call `require()` to turn it into an error"]
pub enum PathOutcome {
    Written,
    Blocked(PathBlock),
}

impl PathOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, PathOutcome::Written)
    }

    /// Converts a blocked write into [`StoreError::Structural`].
    pub fn require(self) -> StoreResult<()> {
        match self {
            PathOutcome::Written => Ok(()),
            PathOutcome::Blocked(block) => Err(StoreError::Structural(block)),
        }
    }
}

/// Assigns `value` at `path` inside `doc`.
///
/// Every segment but the last must name an existing object.  `doc` is left
/// untouched when the descent is blocked.
///
/// # Errors
///
/// Returns [`StoreError::InvalidPath`] for a path without segments.  A
/// blocked descent is reported through [`PathOutcome::Blocked`], not as an
/// error.
pub fn assign(doc: &mut Document, path: &str, value: Value) -> StoreResult<PathOutcome> {
    let segs = segments(path)?;
    let Some((leaf, parents)) = segs.split_last() else {
        return Err(StoreError::InvalidPath(path.to_string()));
    };

    let mut cursor = doc;
    for seg in parents {
        cursor = match cursor.get_mut(*seg) {
            Some(Value::Object(map)) => map,
            Some(_) => return Ok(blocked(path, seg, BlockReason::NotAnObject)),
            None => return Ok(blocked(path, seg, BlockReason::Missing)),
        };
    }

    cursor.insert((*leaf).to_string(), value);
    Ok(PathOutcome::Written)
}

fn blocked(path: &str, segment: &str, reason: BlockReason) -> PathOutcome {
    PathOutcome::Blocked(PathBlock {
        path: path.to_string(),
        segment: segment.to_string(),
        reason,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
