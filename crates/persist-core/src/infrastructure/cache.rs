//! Document cache strategies for the config store.
//!
//! The strategy is picked once, at construction, from a [`CachePolicy`]:
//!
//! - [`AlwaysReread`] never holds a copy; every access goes to disk.
//! - [`ReadThrough`] keeps the last document read or written.  Every write
//!   through the store refreshes it.  Changes made to the file by anyone
//!   else are never noticed.

use std::fmt;

use crate::domain::value::Document;

/// A place to keep the most recent copy of a document.
pub trait DocumentCache: fmt::Debug + Send {
    /// Returns the cached document, if this strategy holds one.
    fn get(&self) -> Option<&Document>;

    /// Records `doc` as the current document.
    fn store(&mut self, doc: &Document);

    /// Short name used in log fields.
    fn name(&self) -> &'static str;
}

/// Cache policy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    AlwaysReread,
    #[default]
    ReadThrough,
}

impl CachePolicy {
    /// Builds the strategy for this policy.
    pub fn build(self) -> Box<dyn DocumentCache> {
        match self {
            CachePolicy::AlwaysReread => Box::new(AlwaysReread),
            CachePolicy::ReadThrough => Box::new(ReadThrough::default()),
        }
    }
}

/// Holds nothing.
#[derive(Debug, Default)]
pub struct AlwaysReread;

impl DocumentCache for AlwaysReread {
    fn get(&self) -> Option<&Document> {
        None
    }

    fn store(&mut self, _doc: &Document) {}

    fn name(&self) -> &'static str {
        "always-reread"
    }
}

/// Holds the last document seen.
#[derive(Debug, Default)]
pub struct ReadThrough {
    doc: Option<Document>,
}

impl DocumentCache for ReadThrough {
    fn get(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    fn store(&mut self, doc: &Document) {
        self.doc = Some(doc.clone());
    }

    fn name(&self) -> &'static str {
        "read-through"
    }
}
