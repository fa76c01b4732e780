//! Availability ranges, UTC normalization and day splitting.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::country::CountryCode;
use crate::error::{Result, ValidationErrors};

/// Item-level message for a range whose `from` does not precede its `to`.
pub const INVERTED_RANGE: &str = "The `from` field must be earlier than the `to` field.";

/// One participant's proposed window, in their own UTC offset.
///
/// Construction enforces `from < to`, so every value in circulation is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRange {
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
    country: CountryCode,
}

impl AvailabilityRange {
    /// # Errors
    /// Returns `EngineError::Validation` when `from` is not strictly before `to`.
    pub fn new(
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
        country: CountryCode,
    ) -> Result<Self> {
        if from >= to {
            return Err(ValidationErrors::schema(INVERTED_RANGE).into());
        }
        Ok(Self { from, to, country })
    }

    pub fn from(&self) -> DateTime<FixedOffset> {
        self.from
    }

    pub fn to(&self) -> DateTime<FixedOffset> {
        self.to
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    /// Calendar date of `from` as the participant sees it, in the range's own offset.
    pub fn start_date(&self) -> NaiveDate {
        self.from.date_naive()
    }
}

/// A range converted to UTC. Carries no country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl NormalizedRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

/// Convert both boundaries of `range` to UTC by applying their declared offsets.
pub fn normalize(range: &AvailabilityRange) -> NormalizedRange {
    NormalizedRange {
        from: range.from.with_timezone(&Utc),
        to: range.to.with_timezone(&Utc),
    }
}

/// Split `[from, to]` into one piece per local calendar day, in `from`'s offset.
///
/// Interior pieces end at `23:59:59` and the next one starts at `00:00:00`.
/// A range inside a single day comes back unchanged. `to` is first expressed in
/// `from`'s offset so both ends agree on what "a day" means.
pub fn split_days(
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
) -> Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let offset = *from.offset();
    let end = to.with_timezone(&offset).naive_local();
    let mut cursor = from.naive_local();

    if cursor >= end {
        return Vec::new();
    }

    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    let mut pieces = Vec::new();

    while cursor.date() < end.date() {
        let day_end = cursor.date().and_time(last_second);
        pieces.push((at_offset(cursor, offset), at_offset(day_end, offset)));
        cursor = (cursor.date() + Duration::days(1)).and_time(NaiveTime::MIN);
    }

    // A range ending exactly at midnight leaves nothing for the final day.
    if cursor < end {
        pieces.push((at_offset(cursor, offset), at_offset(end, offset)));
    }

    pieces
}

fn at_offset(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
