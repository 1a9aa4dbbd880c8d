//! # Alert Payload
//!
//! The JSON document the search platform writes to the alert action's
//! standard input.

use crate::fields::render_value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::io::Read;

/// Error type for reading and parsing the incoming payload
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read alert payload: {0}")]
    Read(#[from] std::io::Error),

    #[error("Malformed alert payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single triggered alert as delivered by the search platform
///
/// Only the keys the adapter consumes are modelled explicitly. Everything else
/// the platform sends (`sid`, `server_uri`, `owner`, ...) is kept in `extra`
/// and reachable through [`AlertPayload::param`].
///
/// `result` preserves the key order of the input document, which drives the
/// order of wildcard field expansion.
///
/// `search_name` and `results_link` accept any JSON value; non-string values
/// are shown as their JSON text. `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// Alert action configuration block
    #[serde(default)]
    pub configuration: Map<String, Value>,

    /// Display name of the saved search that triggered
    #[serde(default)]
    pub search_name: Option<Value>,

    /// Link back to the search results
    #[serde(default)]
    pub results_link: Option<Value>,

    /// First result row of the triggering search
    #[serde(default)]
    pub result: Map<String, Value>,

    /// Top-level keys not consumed by the adapter
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlertPayload {
    /// Parse a payload from a JSON string
    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read the whole stream and parse it as a single payload
    ///
    /// # Errors
    /// - `ParseError::Read` - the stream could not be read
    /// - `ParseError::Malformed` - the content is not a valid payload document
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        Self::from_json(&data)
    }

    /// Display text of the alert name, if present
    pub fn alert_name(&self) -> Option<Cow<'_, str>> {
        self.search_name.as_ref().map(render_value)
    }

    /// Display text of the results link, if present
    pub fn results_link_text(&self) -> Option<Cow<'_, str>> {
        self.results_link.as_ref().map(render_value)
    }

    /// Look up a top-level key that has no dedicated field
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
