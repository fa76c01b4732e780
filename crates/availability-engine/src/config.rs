//! Holiday directory and cache settings.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::holidays::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_TTL};

/// Settings for building a [`SlotResolver`](crate::SlotResolver).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Calendarific API key.
    #[serde(default)]
    pub api_key: String,

    /// Holiday directory base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for the holiday directory, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a fetched holiday calendar is cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// - `CALENDARIFIC_API_KEY`
    /// - `CALENDARIFIC_BASE_URL`
    /// - `HOLIDAY_TIMEOUT_SECS`
    /// - `HOLIDAY_CACHE_TTL_SECS`
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let api_key = std::env::var("CALENDARIFIC_API_KEY").unwrap_or_default();

        let base_url =
            std::env::var("CALENDARIFIC_BASE_URL").unwrap_or_else(|_| default_base_url());

        let timeout_secs = env_secs("HOLIDAY_TIMEOUT_SECS").unwrap_or_else(default_timeout_secs);

        let cache_ttl_secs =
            env_secs("HOLIDAY_CACHE_TTL_SECS").unwrap_or_else(default_cache_ttl_secs);

        Self {
            api_key,
            base_url,
            timeout_secs,
            cache_ttl_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn env_secs(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!(name, value = %raw, "Ignoring non-numeric setting");
            None
        }
    }
}
