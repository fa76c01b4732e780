//! Calendar exclusion: weekends and public holidays.
//!
//! A range is only usable when its start day is a working day in the
//! participant's country. The weekend rule is pure; the holiday rule consults
//! the [`HolidayProvider`], which may hit the holiday directory on a cache miss.

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::country::CountryCode;
use crate::error::Result;
use crate::holidays::HolidayProvider;

/// Saturday or Sunday (days 6 and 7 of a Monday-first week).
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Why a date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    Weekend,
    Holiday,
}

/// A start date that cannot host the meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConflict {
    pub date: NaiveDate,
    pub country: CountryCode,
    pub reason: ExclusionReason,
}

impl fmt::Display for CalendarConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ExclusionReason::Weekend => {
                write!(f, "The date {} falls on a weekend.", self.date)
            }
            ExclusionReason::Holiday => {
                write!(f, "The date {} is a holiday in {}.", self.date, self.country)
            }
        }
    }
}

/// Decides whether a date is usable for a given country.
#[derive(Clone)]
pub struct CalendarValidator {
    holidays: Arc<HolidayProvider>,
}

impl CalendarValidator {
    pub fn new(holidays: Arc<HolidayProvider>) -> Self {
        Self { holidays }
    }

    pub fn holidays(&self) -> &HolidayProvider {
        &self.holidays
    }

    /// Check `date` against the weekend rule, then the holiday calendar of `country`.
    ///
    /// The weekend rule short-circuits, so a weekend never triggers a holiday lookup.
    ///
    /// # Errors
    /// - `EngineError::CalendarConflict` naming the date and the failed rule.
    /// - `EngineError::UpstreamUnavailable` when the holiday lookup fails.
    pub async fn validate(&self, date: NaiveDate, country: CountryCode) -> Result<()> {
        if is_weekend(date) {
            debug!(%date, %country, "Start date falls on a weekend");
            return Err(CalendarConflict {
                date,
                country,
                reason: ExclusionReason::Weekend,
            }
            .into());
        }

        if self.holidays.is_holiday(date, country).await? {
            debug!(%date, %country, "Start date is a public holiday");
            return Err(CalendarConflict {
                date,
                country,
                reason: ExclusionReason::Holiday,
            }
            .into());
        }

        Ok(())
    }
}
