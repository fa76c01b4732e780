//! Public-holiday lookup backed by a TTL cache.
//!
//! Holiday calendars change a few times a year at most, so each `(country, year)`
//! pair is fetched from the directory once and then served from the cache for
//! the TTL window (24 hours by default).
//!
//! - [`HolidaySource`] — the external directory (implemented by [`CalendarificClient`])
//! - [`HolidayCache`] — the injected cache capability (implemented by [`MemoryCache`])
//! - [`HolidayProvider`] — cache-first lookup with at most one fetch per key in flight

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::country::CountryCode;
use crate::error::{EngineError, Result};

mod cache;
mod calendarific;

pub use cache::{CacheStats, HolidayCache, MemoryCache};
pub use calendarific::{CalendarificClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// How long a fetched calendar stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// The public holidays of one country in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    pub country: CountryCode,
    pub year: i32,
    pub dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// An external holiday directory.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Every public-holiday date of `country` in `year`, in any order.
    ///
    /// # Errors
    /// `EngineError::UpstreamUnavailable` on transport failure or a non-success reply.
    async fn fetch(&self, country: CountryCode, year: i32) -> Result<Vec<NaiveDate>>;
}

/// Cache key for a `(country, year)` pair, e.g. `SG-2022`.
pub fn cache_key(country: CountryCode, year: i32) -> String {
    format!("{country}-{year}")
}

/// Outcome of one directory fetch, shared with every caller that joined it.
type FetchOutcome = std::result::Result<Vec<NaiveDate>, String>;

/// A fetch in progress for one cache key.
type Flight = Arc<OnceCell<FetchOutcome>>;

/// Cache-first holiday lookup.
///
/// Concurrent misses on the same key join a single in-flight fetch and all
/// receive its outcome, error included, so the directory sees one request per
/// key per TTL. The flight is dropped once it settles; failures are not cached.
pub struct HolidayProvider {
    source: Arc<dyn HolidaySource>,
    cache: Arc<dyn HolidayCache>,
    ttl: Duration,
    flights: Mutex<HashMap<String, Flight>>,
}

impl HolidayProvider {
    pub fn new(source: Arc<dyn HolidaySource>, cache: Arc<dyn HolidayCache>) -> Self {
        Self {
            source,
            cache,
            ttl: DEFAULT_TTL,
            flights: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The holiday calendar of `country` for `year`.
    ///
    /// # Errors
    /// Propagates `EngineError::UpstreamUnavailable` from the source on a miss.
    /// Nothing is cached when the fetch fails.
    pub async fn holidays(&self, country: CountryCode, year: i32) -> Result<HolidaySet> {
        let key = cache_key(country, year);

        if let Some(dates) = self.cached(&key).await {
            return Ok(HolidaySet { country, year, dates });
        }

        let flight = self.join_flight(&key).await;
        let outcome = flight
            .get_or_init(|| self.fetch_and_store(country, year, &key))
            .await
            .clone();
        self.land_flight(&key, &flight).await;

        match outcome {
            Ok(dates) => Ok(HolidaySet {
                country,
                year,
                dates: dates.into_iter().collect(),
            }),
            Err(message) => Err(EngineError::UpstreamUnavailable(message)),
        }
    }

    /// Number of fetches currently in progress.
    pub async fn pending_fetches(&self) -> usize {
        self.flights.lock().await.len()
    }

    /// Whether the calendar date `date` is a public holiday in `country`.
    pub async fn is_holiday(&self, date: NaiveDate, country: CountryCode) -> Result<bool> {
        Ok(self.holidays(country, date.year()).await?.contains(date))
    }

    async fn cached(&self, key: &str) -> Option<BTreeSet<NaiveDate>> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str::<Vec<NaiveDate>>(&raw) {
            Ok(dates) => {
                debug!(key, count = dates.len(), "Holiday cache hit");
                Some(dates.into_iter().collect())
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cached holidays");
                None
            }
        }
    }

    async fn fetch_and_store(&self, country: CountryCode, year: i32, key: &str) -> FetchOutcome {
        // A flight that settled just before this one started may have filled the entry.
        if let Some(dates) = self.cached(key).await {
            return Ok(dates.into_iter().collect());
        }

        info!(%country, year, "Fetching holidays from directory");
        let dates = match self.source.fetch(country, year).await {
            Ok(dates) => dates,
            Err(e) => {
                warn!(%country, year, error = %e, "Holiday directory lookup failed");
                return Err(upstream_message(e));
            }
        };

        match serde_json::to_string(&dates) {
            Ok(payload) => self.cache.set_with_expiry(key, payload, self.ttl).await,
            Err(e) => warn!(key, error = %e, "Could not serialize holidays for caching"),
        }

        Ok(dates)
    }

    async fn join_flight(&self, key: &str) -> Flight {
        let mut flights = self.flights.lock().await;
        flights.entry(key.to_string()).or_default().clone()
    }

    /// Forget `flight` once it has settled, unless a newer flight replaced it.
    async fn land_flight(&self, key: &str, flight: &Flight) {
        let mut flights = self.flights.lock().await;
        if flights
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            flights.remove(key);
        }
    }
}

fn upstream_message(error: EngineError) -> String {
    match error {
        EngineError::UpstreamUnavailable(message) => message,
        other => other.to_string(),
    }
}
