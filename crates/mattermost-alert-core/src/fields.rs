//! # Field Extraction
//!
//! Selects result fields with a comma-separated selector and renders them as
//! a markdown table.
//!
//! Each selector candidate is tried in order:
//! - an exact key match adds that single field
//! - otherwise a candidate containing `*` has its trailing `*` characters
//!   stripped and adds every result key starting with the remaining prefix
//! - anything else matches nothing
//!
//! Candidates are not trimmed, so `"host, user"` looks for a key named
//! `" user"`. A `*` that is not trailing stays part of the prefix.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt::Write;

const TABLE_HEADER: &str = "| Field        | Value        |\n";
const TABLE_SEPARATOR: &str = "|-------------|-------------|\n";

/// Ordered set of fields selected from a result row
///
/// Iteration follows discovery order. Inserting a key that is already present
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields(IndexMap<String, Value>);

impl ExtractedFields {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Look up a selected field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of selected fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in discovery order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Render the fields as a two-column markdown table
    ///
    /// Returns an empty string when no fields were selected so that the
    /// message carries no table at all.
    pub fn to_markdown_table(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut table = String::from(TABLE_HEADER);
        table.push_str(TABLE_SEPARATOR);
        for (key, value) in self.iter() {
            // Writing to a String cannot fail
            let _ = writeln!(table, "| {}       | {}      |", key, render_value(value));
        }
        table
    }
}

/// Select the fields named by `selector` from a result row
///
/// An empty or absent selector selects nothing.
pub fn extract_fields(selector: Option<&str>, results: &Map<String, Value>) -> ExtractedFields {
    let mut extracted = ExtractedFields::new();

    let selector = match selector {
        Some(s) if !s.is_empty() => s,
        _ => return extracted,
    };

    for candidate in selector.split(',') {
        if let Some(value) = results.get(candidate) {
            extracted.insert(candidate, value.clone());
        } else if candidate.contains('*') {
            let prefix = candidate.trim_end_matches('*');
            for (key, value) in results {
                if key.starts_with(prefix) {
                    extracted.insert(key.as_str(), value.clone());
                }
            }
        }
    }

    extracted
}

/// Text shown in the value column: strings verbatim, everything else as JSON
pub(crate) fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
