//! Key-value cache for serialized holiday calendars, with per-entry expiry.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Cache capability injected into the [`HolidayProvider`](super::HolidayProvider).
///
/// Implementations must be safe to share across concurrent requests. An entry
/// past its expiry must never be returned.
#[async_trait]
pub trait HolidayCache: Send + Sync {
    /// The stored value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous entry, for `ttl`.
    async fn set_with_expiry(&self, key: &str, value: String, ttl: Duration);
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped because they were past their expiry.
    pub expirations: u64,
    pub entries: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, expirations={}, entries={}",
            self.hits, self.misses, self.expirations, self.entries
        )
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

/// Process-wide in-memory cache.
///
/// Expiry is measured on the tokio clock, so tests can pause and advance time.
/// Expired entries are dropped when read and swept on every write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries: state.entries.len(),
            ..state.stats
        }
    }
}

#[async_trait]
impl HolidayCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut state = self.state.lock().await;

        let expired = match state.entries.get(key) {
            None => {
                state.stats.misses += 1;
                return None;
            }
            Some(entry) => entry.expires_at <= Instant::now(),
        };

        if expired {
            debug!(key, "Cache entry expired");
            state.entries.remove(key);
            state.stats.expirations += 1;
            state.stats.misses += 1;
            return None;
        }

        state.stats.hits += 1;
        state.entries.get(key).map(|entry| entry.value.clone())
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl: Duration) {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        // Keys that are never read again are only dropped here.
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.expires_at > now);
        let swept = before - state.entries.len();
        if swept > 0 {
            debug!(swept, "Swept expired cache entries");
            state.stats.expirations += swept as u64;
        }

        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }
}
