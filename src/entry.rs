//! Key/value record shared by both table variants

use std::fmt;

/// A stored key and its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    /// Lookup key, unique among the live entries of a table
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry
    pub(crate) const fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    /// Borrowed `(key, value)` view handed out by iterators
    pub(crate) fn as_pair(&self) -> (&str, &V) {
        (self.key.as_str(), &self.value)
    }
}

impl<V: fmt::Display> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}
