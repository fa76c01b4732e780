//! Inbound JSON validation.
//!
//! Turns a request body such as
//!
//! ```json
//! [{"from": "2022-05-02T09:00:00.0+08:00", "to": "2022-05-02T17:00:00.0+08:00", "cc": "SG"}]
//! ```
//!
//! into [`AvailabilityRange`]s. Every item is checked and all problems are
//! reported together, keyed by item index and field.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::{Map, Value};

use crate::country::CountryCode;
use crate::error::{Result, ValidationErrors};
use crate::range::{AvailabilityRange, INVERTED_RANGE};

pub const INVALID_INPUT: &str = "Invalid input type.";
pub const EMPTY_INPUT: &str = "Invalid input type. The array is empty.";
pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NULL_FIELD: &str = "Field may not be null.";
pub const INVALID_DATETIME: &str = "Not a valid datetime.";
pub const MISSING_OFFSET: &str = "Datetime must include a UTC offset.";
pub const INVALID_STRING: &str = "Not a valid string.";

/// Field name used in error reports for the country code.
const COUNTRY_FIELD: &str = "cc";
const COUNTRY_ALIAS: &str = "countryCode";

/// Validate a request body and build the ranges it describes.
///
/// # Errors
/// Returns `EngineError::Validation` when the body is not a non-empty array,
/// or when any item has a missing, malformed or out-of-order field.
pub fn parse_ranges(body: &Value) -> Result<Vec<AvailabilityRange>> {
    let items = match body {
        Value::Array(items) => items,
        _ => return Err(ValidationErrors::schema(INVALID_INPUT).into()),
    };

    if items.is_empty() {
        return Err(ValidationErrors::schema(EMPTY_INPUT).into());
    }

    let mut errors = ValidationErrors::default();
    let mut ranges = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let Some(fields) = item.as_object() else {
            errors.push_item(index, INVALID_INPUT);
            continue;
        };

        let from = timestamp_field(fields, "from", index, &mut errors);
        let to = timestamp_field(fields, "to", index, &mut errors);
        let country = country_field(fields, index, &mut errors);

        let ordered = match (from, to) {
            (Some(from), Some(to)) if from >= to => {
                errors.push_item(index, INVERTED_RANGE);
                None
            }
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        };

        if let (Some((from, to)), Some(country)) = (ordered, country) {
            ranges.push(AvailabilityRange::new(from, to, country)?);
        }
    }

    if !errors.is_empty() {
        return Err(errors.into());
    }

    Ok(ranges)
}

fn timestamp_field(
    fields: &Map<String, Value>,
    name: &str,
    index: usize,
    errors: &mut ValidationErrors,
) -> Option<DateTime<FixedOffset>> {
    let raw = match fields.get(name) {
        None => {
            errors.push_field(index, name, MISSING_FIELD);
            return None;
        }
        Some(Value::Null) => {
            errors.push_field(index, name, NULL_FIELD);
            return None;
        }
        Some(Value::String(raw)) => raw,
        Some(_) => {
            errors.push_field(index, name, INVALID_DATETIME);
            return None;
        }
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Some(at),
        Err(_) => {
            // Distinguish "valid local time, no offset" from plain garbage.
            let message = if NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok() {
                MISSING_OFFSET
            } else {
                INVALID_DATETIME
            };
            errors.push_field(index, name, message);
            None
        }
    }
}

fn country_field(
    fields: &Map<String, Value>,
    index: usize,
    errors: &mut ValidationErrors,
) -> Option<CountryCode> {
    let value = fields
        .get(COUNTRY_FIELD)
        .or_else(|| fields.get(COUNTRY_ALIAS));

    match value {
        None => {
            errors.push_field(index, COUNTRY_FIELD, MISSING_FIELD);
            None
        }
        Some(Value::Null) => {
            errors.push_field(index, COUNTRY_FIELD, NULL_FIELD);
            None
        }
        Some(Value::String(code)) => match code.parse::<CountryCode>() {
            Ok(country) => Some(country),
            Err(e) => {
                errors.push_field(index, COUNTRY_FIELD, e.to_string());
                None
            }
        },
        Some(_) => {
            errors.push_field(index, COUNTRY_FIELD, INVALID_STRING);
            None
        }
    }
}
