//! The resolved meeting slot and its wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single window common to every submitted range. Always positive width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSlot {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ResultSlot {
    /// Render both boundaries with [`format_timestamp`].
    pub fn format(&self) -> FormattedSlot {
        FormattedSlot {
            from: format_timestamp(self.from),
            to: format_timestamp(self.to),
        }
    }
}

/// A slot as it appears on the wire: `{"from": "...Z", "to": "...Z"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSlot {
    pub from: String,
    pub to: String,
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SS.fZ`.
///
/// Exactly one fractional digit is kept (tenths of a second, truncated, never rounded).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    // Leap seconds report nanoseconds past 1e9; fold them back into a single digit.
    let tenths = (at.timestamp_subsec_nanos() % 1_000_000_000) / 100_000_000;
    format!("{}.{}Z", at.format("%Y-%m-%dT%H:%M:%S"), tenths)
}
