//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use availability_engine::error::{EngineError, Result};
use availability_engine::{CountryCode, HolidayProvider, HolidaySource, MemoryCache};
use chrono::NaiveDate;

/// In-process holiday directory that counts how often it is asked.
#[derive(Default)]
pub struct StubDirectory {
    holidays: HashMap<(CountryCode, i32), Vec<NaiveDate>>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holiday(mut self, country: &str, date: &str) -> Self {
        let country = cc(country);
        let date = day(date);
        self.holidays
            .entry((country, chrono::Datelike::year(&date)))
            .or_default()
            .push(date);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidaySource for StubDirectory {
    async fn fetch(&self, country: CountryCode, year: i32) -> Result<Vec<NaiveDate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(EngineError::UpstreamUnavailable(message.clone()));
        }
        Ok(self
            .holidays
            .get(&(country, year))
            .cloned()
            .unwrap_or_default())
    }
}

/// Provider over `directory` with a fresh cache and the default TTL.
pub fn provider(directory: Arc<StubDirectory>) -> HolidayProvider {
    HolidayProvider::new(directory, Arc::new(MemoryCache::new()))
}

pub fn cc(code: &str) -> CountryCode {
    code.parse().expect("supported country")
}

pub fn day(date: &str) -> NaiveDate {
    date.parse().expect("ISO date")
}
