//! Store payloads and the by-value comparator.

use crate::key::Parrot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Opaque, nullable string payload (the parrot's owner).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(Option<String>);

impl Value {
    pub fn null() -> Self {
        Value(None)
    }

    pub fn new(value: impl Into<String>) -> Self {
        Value(Some(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(Some(value))
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        Value(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("null"))
    }
}

/// A (key, value) pair. The key is optional only for search probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: Option<Parrot>,
    value: Value,
}

impl Entry {
    pub fn new(key: Parrot, value: Value) -> Self {
        Entry {
            key: Some(key),
            value,
        }
    }

    /// An entry carrying only a value; used as a binary-search target.
    pub fn probe(value: Value) -> Self {
        Entry { key: None, value }
    }

    pub fn key(&self) -> Option<&Parrot> {
        self.key.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Option<Parrot>, Value) {
        (self.key, self.value)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} -> {}", key, self.value),
            None => write!(f, "<probe> -> {}", self.value),
        }
    }
}

/// Orders entries by value alone: null first, then lexicographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueComparator;

impl ValueComparator {
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        self.compare_values(&a.value, &b.value)
    }

    pub fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        match (a.as_str(), b.as_str()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}
