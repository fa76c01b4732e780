//! Error types for availability-engine operations.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::calendar::CalendarConflict;

/// Key under which messages that are not tied to a single field are reported.
pub const SCHEMA_KEY: &str = "_schema";

/// Every way a resolution request can fail. All variants are terminal for the request.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The inbound ranges were malformed or semantically invalid.
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    /// The start day of some range is a weekend or a public holiday.
    #[error("Unable to find an available slot. {0}")]
    CalendarConflict(CalendarConflict),

    /// All ranges are valid but share no common window of positive width.
    #[error("There were no slots available where all these ranges matched.")]
    NoOverlap,

    /// The holiday directory failed; carries the upstream message when it gave one.
    #[error("{0}")]
    UpstreamUnavailable(String),
}

impl From<ValidationErrors> for EngineError {
    fn from(errors: ValidationErrors) -> Self {
        EngineError::Validation(errors)
    }
}

impl From<CalendarConflict> for EngineError {
    fn from(conflict: CalendarConflict) -> Self {
        EngineError::CalendarConflict(conflict)
    }
}

/// Convenience alias used throughout availability-engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Validation messages collected across a whole request.
///
/// Messages are grouped the way the HTTP envelope reports them: request-level
/// messages under `_schema`, then per item index and per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    schema: Vec<String>,
    items: BTreeMap<usize, BTreeMap<String, Vec<String>>>,
}

impl ValidationErrors {
    /// A single request-level message.
    pub fn schema(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push_schema(message);
        errors
    }

    pub fn push_schema(&mut self, message: impl Into<String>) {
        self.schema.push(message.into());
    }

    /// Record a message against `field` of the item at `index`.
    pub fn push_field(&mut self, index: usize, field: &str, message: impl Into<String>) {
        self.items
            .entry(index)
            .or_default()
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record an item-level message that involves more than one field.
    pub fn push_item(&mut self, index: usize, message: impl Into<String>) {
        self.push_field(index, SCHEMA_KEY, message);
    }

    pub fn is_empty(&self) -> bool {
        self.schema.is_empty() && self.items.is_empty()
    }

    pub fn schema_messages(&self) -> &[String] {
        &self.schema
    }

    /// Messages for one field of one item; empty when the field was valid.
    pub fn field_messages(&self, index: usize, field: &str) -> &[String] {
        self.items
            .get(&index)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Item indices that carry at least one message, ascending.
    pub fn failed_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.keys().copied()
    }

    /// Render as `{"json": {"_schema": [...], "0": {"from": [...]}}}`.
    pub fn to_json(&self) -> Value {
        let mut location = Map::new();
        if !self.schema.is_empty() {
            location.insert(SCHEMA_KEY.to_string(), Value::from(self.schema.clone()));
        }
        for (index, fields) in &self.items {
            let fields: Map<String, Value> = fields
                .iter()
                .map(|(field, messages)| (field.clone(), Value::from(messages.clone())))
                .collect();
            location.insert(index.to_string(), Value::Object(fields));
        }
        let mut root = Map::new();
        root.insert("json".to_string(), Value::Object(location));
        Value::Object(root)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.schema.clone();
        for (index, fields) in &self.items {
            for (field, messages) in fields {
                for message in messages {
                    if field == SCHEMA_KEY {
                        parts.push(format!("[{index}]: {message}"));
                    } else {
                        parts.push(format!("[{index}].{field}: {message}"));
                    }
                }
            }
        }
        write!(f, "{}", parts.join("; "))
    }
}

