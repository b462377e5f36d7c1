//! Core, format-agnostic types for xmlstrings.
//! Readers decode into these; writers serialize these.

use std::{
    collections::{BTreeMap, btree_map},
    fmt::Display,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

/// One localization entry.
///
/// `value` is `None` when the markup element exists but has no text content,
/// which is distinct from `Some(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringEntry {
    pub key: String,
    pub value: Option<String>,
}

impl StringEntry {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        StringEntry {
            key: key.into(),
            value,
        }
    }
}

/// A mapping from key to (possibly absent) text, built from either format.
///
/// Keys are unique and iterate in ascending order. Inserting an existing key
/// replaces its value, so the last occurrence in a source file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StringTable {
    entries: BTreeMap<String, Option<String>>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> Option<Option<String>> {
        self.entries.insert(key.into(), value)
    }

    /// Looks up a key. The outer `Option` is key presence, the inner one is
    /// value presence.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(Option::as_deref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Number of entries whose value is absent.
    pub fn absent_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }
}

impl FromIterator<StringEntry> for StringTable {
    fn from_iter<I: IntoIterator<Item = StringEntry>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for entry in iter {
            table.insert(entry.key, entry.value);
        }
        table
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl IntoIterator for StringTable {
    type Item = StringEntry;
    type IntoIter = std::iter::Map<
        btree_map::IntoIter<String, Option<String>>,
        fn((String, Option<String>)) -> StringEntry,
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn to_entry((key, value): (String, Option<String>)) -> StringEntry {
            StringEntry { key, value }
        }
        self.entries.into_iter().map(to_entry as fn(_) -> _)
    }
}

/// Options for writing `.strings` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ExportOptions {
    /// Emit `"key" = "";` for entries without text instead of dropping them.
    pub include_empty: bool,
}

impl ExportOptions {
    /// Creates default export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables output of entries without text.
    pub fn with_include_empty(mut self, include_empty: bool) -> Self {
        self.include_empty = include_empty;
        self
    }
}

/// Counters produced while encoding a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ExportStats {
    /// Number of keys in the source table.
    pub total: usize,
    /// Entries written with their text.
    pub exported: usize,
    /// Absent entries written as `""`.
    pub exported_empty: usize,
    /// Absent entries left out of the output.
    pub skipped: usize,
}

impl Display for ExportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total: {}, exported: {}, exported empty: {}, skipped: {}",
            self.total, self.exported, self.exported_empty, self.skipped
        )
    }
}

/// The outcome of comparing one key between the original and edited tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChangeRecord {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl ChangeRecord {
    /// A record is applicable when both sides have text and the text differs.
    ///
    /// An element without text is never given one.
    pub fn is_applicable(&self) -> bool {
        match (&self.old_value, &self.new_value) {
            (Some(old), Some(new)) => old != new,
            _ => false,
        }
    }
}

/// The result of merging an edited table into a markup document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MergeResult {
    /// Keys whose text was replaced.
    pub applied: Vec<ChangeRecord>,
    /// Keys that were checked but left as they were.
    pub skipped: Vec<ChangeRecord>,
    /// Number of tagged elements in the markup document.
    pub element_count: usize,
    /// Destination path, when a file was written.
    pub written: Option<PathBuf>,
}

impl MergeResult {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of edited keys that also exist in the original.
    pub fn total_checked(&self) -> usize {
        self.applied.len() + self.skipped.len()
    }

    /// `true` when nothing needs to be written back.
    pub fn is_unchanged(&self) -> bool {
        self.applied.is_empty()
    }
}
