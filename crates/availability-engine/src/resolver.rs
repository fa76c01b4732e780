//! End-to-end slot resolution.
//!
//! Validation runs over every range first and stops at the first calendar
//! conflict; only then are the ranges normalized and intersected.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::calendar::CalendarValidator;
use crate::config::EngineConfig;
use crate::country::CountryCode;
use crate::error::{Result, ValidationErrors};
use crate::holidays::{CalendarificClient, HolidayCache, HolidayProvider, HolidaySource, MemoryCache};
use crate::intersect::intersect;
use crate::range::{normalize, AvailabilityRange, NormalizedRange};
use crate::schema::{parse_ranges, EMPTY_INPUT};
use crate::slot::{FormattedSlot, ResultSlot};

/// Resolves the common meeting slot for a set of ranges.
///
/// Cheap to clone; clones share the holiday cache.
#[derive(Clone)]
pub struct SlotResolver {
    validator: CalendarValidator,
}

impl SlotResolver {
    pub fn new(holidays: Arc<HolidayProvider>) -> Self {
        Self {
            validator: CalendarValidator::new(holidays),
        }
    }

    /// Wire a resolver to `source` with a fresh in-memory cache.
    pub fn with_source(source: Arc<dyn HolidaySource>, cache_ttl: Duration) -> Self {
        let cache: Arc<dyn HolidayCache> = Arc::new(MemoryCache::new());
        let provider = HolidayProvider::new(source, cache).with_ttl(cache_ttl);
        Self::new(Arc::new(provider))
    }

    /// Calendarific-backed resolver built from `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let source = Arc::new(CalendarificClient::from_config(config)?);
        Ok(Self::with_source(source, config.cache_ttl()))
    }

    /// Validate the start date of every range, then intersect them in UTC.
    ///
    /// # Errors
    /// - `EngineError::Validation` for an empty slice.
    /// - `EngineError::CalendarConflict` for the first range starting on a weekend or holiday.
    /// - `EngineError::UpstreamUnavailable` when a holiday lookup fails.
    /// - `EngineError::NoOverlap` when the ranges share no window.
    pub async fn resolve(&self, ranges: &[AvailabilityRange]) -> Result<ResultSlot> {
        if ranges.is_empty() {
            return Err(ValidationErrors::schema(EMPTY_INPUT).into());
        }

        for range in ranges {
            self.validator
                .validate(range.start_date(), range.country())
                .await?;
        }

        let normalized: Vec<NormalizedRange> = ranges.iter().map(normalize).collect();
        let slot = intersect(&normalized)?;
        debug!(from = %slot.from, to = %slot.to, ranges = ranges.len(), "Resolved slot");
        Ok(slot)
    }

    /// [`parse_ranges`] followed by [`resolve`](Self::resolve), formatted for the wire.
    pub async fn resolve_json(&self, body: &Value) -> Result<FormattedSlot> {
        let ranges = parse_ranges(body)?;
        Ok(self.resolve(&ranges).await?.format())
    }

    /// Whether `date` is a public holiday in `country`. Weekends are not considered.
    pub async fn is_holiday(&self, date: NaiveDate, country: CountryCode) -> Result<bool> {
        self.validator.holidays().is_holiday(date, country).await
    }
}
