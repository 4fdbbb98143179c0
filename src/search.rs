//! Searching a key-indexed collection by value.
//!
//! There is no value index, so every search copies the entries, sorts the copy
//! with [`ValueComparator`] and binary-searches it for a probe holding only the
//! target value. The same comparator drives both steps. Cost is O(n log n) per
//! call.

use crate::value::{Entry, Value, ValueComparator};

/// Entries sorted by value, ready for repeated binary searches.
#[derive(Debug, Clone)]
pub struct ValueProjection {
    entries: Vec<Entry>,
    comparator: ValueComparator,
}

impl ValueProjection {
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Self {
        let comparator = ValueComparator;
        let mut entries: Vec<Entry> = entries.into_iter().collect();
        // Stable, so equal values keep their incoming order.
        entries.sort_by(|a, b| comparator.compare(a, b));
        ValueProjection {
            entries,
            comparator,
        }
    }

    /// Position of some entry holding `value`, if any.
    pub fn position(&self, value: &Value) -> Option<usize> {
        let probe = Entry::probe(value.clone());
        self.entries
            .binary_search_by(|entry| self.comparator.compare(entry, &probe))
            .ok()
    }

    pub fn find(&self, value: &Value) -> Option<&Entry> {
        self.position(value).map(|idx| &self.entries[idx])
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// One-shot value search: project, sort, binary-search.
pub fn find_by_value(entries: impl IntoIterator<Item = Entry>, value: &Value) -> Option<Entry> {
    let projection = ValueProjection::new(entries);
    projection.find(value).cloned()
}
