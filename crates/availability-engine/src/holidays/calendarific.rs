//! Client for the Calendarific holiday directory.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::HolidaySource;
use crate::config::EngineConfig;
use crate::country::CountryCode;
use crate::error::{EngineError, Result};

pub const DEFAULT_BASE_URL: &str = "https://calendarific.com/api/v2";

/// Upper bound on a single directory request, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const UNKNOWN_ERROR: &str = "Unknown error with holidays API.";

/// Successful reply: `{"response": {"holidays": [{"date": {"iso": "2022-12-25"}}]}}`.
#[derive(Debug, Deserialize)]
struct HolidaysEnvelope {
    response: HolidaysResponse,
}

/// The directory answers with an empty array instead of an object when it has nothing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HolidaysResponse {
    Holidays { holidays: Vec<Holiday> },
    Empty(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
struct Holiday {
    date: HolidayDate,
}

#[derive(Debug, Deserialize)]
struct HolidayDate {
    iso: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    meta: Option<ErrorMeta>,
}

#[derive(Debug, Deserialize)]
struct ErrorMeta {
    error_detail: Option<String>,
}

/// Calendarific v2 holiday directory.
#[derive(Debug, Clone)]
pub struct CalendarificClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CalendarificClient {
    /// Create a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| {
                EngineError::UpstreamUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.api_key, config.timeout())
    }
}

#[async_trait]
impl HolidaySource for CalendarificClient {
    async fn fetch(&self, country: CountryCode, year: i32) -> Result<Vec<NaiveDate>> {
        let url = format!("{}/holidays", self.base_url);
        let year = year.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("country", country.as_str()),
                ("year", year.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                EngineError::UpstreamUnavailable(format!("Holiday directory request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            EngineError::UpstreamUnavailable(format!("Failed to read holiday directory reply: {}", e))
        })?;

        if !status.is_success() {
            debug!(%status, "Holiday directory returned an error");
            return Err(EngineError::UpstreamUnavailable(upstream_error_message(&body)));
        }

        let envelope: HolidaysEnvelope = serde_json::from_str(&body).map_err(|e| {
            EngineError::UpstreamUnavailable(format!("Malformed holiday directory reply: {}", e))
        })?;

        match envelope.response {
            HolidaysResponse::Holidays { holidays } => holidays
                .iter()
                .map(|holiday| parse_iso_date(&holiday.date.iso))
                .collect(),
            HolidaysResponse::Empty(items) if items.is_empty() => Ok(Vec::new()),
            HolidaysResponse::Empty(items) => Err(EngineError::UpstreamUnavailable(format!(
                "Malformed holiday directory reply: expected no holidays, got {} items",
                items.len()
            ))),
        }
    }
}

/// Prefer the top-level `error`, then `meta.error_detail`, then a generic message.
fn upstream_error_message(body: &str) -> String {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    envelope
        .error
        .or_else(|| envelope.meta.and_then(|meta| meta.error_detail))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// `iso` is either a date or a full timestamp; the calendar date is its first ten characters.
fn parse_iso_date(iso: &str) -> Result<NaiveDate> {
    iso.get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            EngineError::UpstreamUnavailable(format!("Malformed holiday date: {}", iso))
        })
}
