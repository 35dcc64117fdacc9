//! Time-bounded memoization with an injected clock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Currency, Rate};
use crate::port::ExchangeRateSource;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Key-value cache whose entries expire `ttl` after insertion.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: std::time::Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        // Out-of-range TTLs clamp to a year.
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365));
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn is_fresh(&self, entry: &Entry<V>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) < self.ttl
    }

    /// Cached value, if still fresh.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        self.is_fresh(entry, now).then(|| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        self.entries.write().insert(key, Entry { value, stored_at });
    }

    /// Fresh cached value, or the result of `fetch`, stored when `Some`.
    ///
    /// `fetch` runs under the write lock: concurrent callers for an expired
    /// key wait for a single fetch and then all see its value.
    pub fn get_or_fetch<F>(&self, key: K, fetch: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some(value) = self.get(&key) {
            return Some(value);
        }

        let mut entries = self.entries.write();
        let now = self.clock.now();
        if let Some(entry) = entries.get(&key) {
            if self.is_fresh(entry, now) {
                return Some(entry.value.clone());
            }
        }

        let value = fetch()?;
        entries.insert(
            key,
            Entry {
                value: value.clone(),
                stored_at: now,
            },
        );
        Some(value)
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Remove expired entries. Returns count removed.
    pub fn prune_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exchange-rate source memoized for a fixed TTL.
///
/// Unresolvable pairs are not cached, so a later lookup retries.
pub struct CachedExchangeRates<S> {
    inner: S,
    cache: TtlCache<(Currency, Currency), Rate>,
}

impl<S: ExchangeRateSource> CachedExchangeRates<S> {
    pub fn new(inner: S, ttl: std::time::Duration) -> Self {
        Self::with_clock(inner, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(inner: S, ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ExchangeRateSource> ExchangeRateSource for CachedExchangeRates<S> {
    fn exchange_rate(&self, from: &Currency, to: &Currency) -> Option<Rate> {
        self.cache.get_or_fetch((from.clone(), to.clone()), || {
            debug!(%from, %to, "Exchange rate cache miss");
            self.inner.exchange_rate(from, to)
        })
    }
}
