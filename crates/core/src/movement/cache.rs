//! Per-range cache of unfiltered movement result sets.
//!
//! Keyed by the exact range (`"{start}_{end}"`). Entries are replaced
//! whole; overlapping ranges are never merged. Moka bounds the number
//! of entries, while freshness is judged against the injected [`Clock`]
//! so expiry can be tested without sleeping.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use finnza_shared::config::CacheConfig;
use moka::sync::Cache;
use tracing::debug;

use super::types::{Movement, MovementTotals};
use crate::clock::{Clock, SystemClock};
use crate::date_range::DateRange;

/// Default time-to-live for cache entries (5 minutes).
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Default cache capacity (number of ranges).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// A full result set for one range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Every movement of the range, unfiltered.
    pub movements: Vec<Movement>,
    /// Totals over the whole range.
    pub totals: MovementTotals,
    /// When the entry was stored.
    pub created_at: DateTime<Utc>,
}

/// Cache of movement result sets, one entry per date range.
#[derive(Clone)]
pub struct MovementCache<C: Clock = SystemClock> {
    entries: Cache<String, Arc<CacheEntry>>,
    ttl: Duration,
    clock: C,
}

impl MovementCache<SystemClock> {
    /// Cache on the wall clock with the default 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_TTL_SECS, DEFAULT_CACHE_CAPACITY, SystemClock)
    }
}

impl Default for MovementCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MovementCache<C> {
    /// Creates a cache with an explicit TTL, capacity and clock.
    #[must_use]
    pub fn with_clock(ttl_secs: u64, max_capacity: u64, clock: C) -> Self {
        let entries = Cache::builder().max_capacity(max_capacity).build();
        Self {
            entries,
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
            clock,
        }
    }

    /// Creates a cache from the `cache` configuration section.
    #[must_use]
    pub fn from_config(config: &CacheConfig, clock: C) -> Self {
        Self::with_clock(config.ttl_secs, config.max_entries, clock)
    }

    /// Returns the entry for `range` while it is fresh.
    ///
    /// Fresh means `now - created_at < ttl`. A stale entry is dropped and
    /// reported as absent.
    pub fn get(&self, range: &DateRange) -> Option<Arc<CacheEntry>> {
        let key = range.cache_key();
        let entry = self.entries.get(&key)?;
        let age = self.clock.now() - entry.created_at;

        if age < self.ttl {
            debug!(range = %key, age_ms = age.num_milliseconds(), "Movement cache hit");
            Some(entry)
        } else {
            debug!(range = %key, age_ms = age.num_milliseconds(), "Movement cache entry expired");
            self.entries.invalidate(&key);
            None
        }
    }

    /// Stores the full result set of `range`, replacing any previous entry.
    pub fn put(
        &self,
        range: &DateRange,
        movements: Vec<Movement>,
        totals: MovementTotals,
    ) -> Arc<CacheEntry> {
        let key = range.cache_key();
        let entry = Arc::new(CacheEntry {
            movements,
            totals,
            created_at: self.clock.now(),
        });
        debug!(range = %key, items = entry.movements.len(), "Movement cache populated");
        self.entries.insert(key, Arc::clone(&entry));
        entry
    }

    /// Drops every entry.
    pub fn invalidate(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Drops the entry for one range.
    pub fn invalidate_range(&self, range: &DateRange) {
        self.entries.invalidate(&range.cache_key());
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// The configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::movement::types::fixtures::movement;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 18, 9, 0, 0).unwrap())
    }

    fn march() -> DateRange {
        DateRange::between(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        )
    }

    fn cache(clock: &ManualClock) -> MovementCache<ManualClock> {
        MovementCache::with_clock(DEFAULT_TTL_SECS, 10, clock.clone())
    }

    fn store(cache: &MovementCache<ManualClock>, range: &DateRange, id: &str) {
        let movements = vec![movement(id, false, dec!(100))];
        let totals = MovementTotals::from_movements(&movements);
        cache.put(range, movements, totals);
    }

    #[test]
    fn test_miss_then_hit() {
        let clock = clock();
        let cache = cache(&clock);
        assert!(cache.get(&march()).is_none());

        store(&cache, &march(), "a");
        let entry = cache.get(&march()).unwrap();
        assert_eq!(entry.movements[0].id, "a");
        assert_eq!(entry.totals.revenue, dec!(100));
        assert_eq!(entry.created_at, clock.now());
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");

        clock.advance(Duration::minutes(4) + Duration::seconds(59));
        assert!(cache.get(&march()).is_some());
    }

    #[test]
    fn test_stale_just_after_ttl() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");

        clock.advance(Duration::minutes(5) + Duration::milliseconds(1));
        assert!(cache.get(&march()).is_none());
        // Stays absent once dropped.
        clock.set(Utc.with_ymd_and_hms(2025, 3, 18, 9, 0, 0).unwrap());
        assert!(cache.get(&march()).is_none());
    }

    #[test]
    fn test_exactly_ttl_is_stale() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");

        clock.advance(Duration::minutes(5));
        assert!(cache.get(&march()).is_none());
    }

    #[test]
    fn test_put_replaces_whole_entry() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");
        clock.advance(Duration::minutes(3));
        store(&cache, &march(), "b");

        clock.advance(Duration::minutes(3));
        let entry = cache.get(&march()).unwrap();
        assert_eq!(entry.movements.len(), 1);
        assert_eq!(entry.movements[0].id, "b");
    }

    #[test]
    fn test_invalidate_drops_everything() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");
        store(&cache, &DateRange::unbounded(), "b");

        cache.invalidate();
        assert!(cache.get(&march()).is_none());
        assert!(cache.get(&DateRange::unbounded()).is_none());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_invalidate_range_keeps_others() {
        let clock = clock();
        let cache = cache(&clock);
        store(&cache, &march(), "a");
        store(&cache, &DateRange::unbounded(), "b");

        cache.invalidate_range(&march());
        assert!(cache.get(&march()).is_none());
        assert!(cache.get(&DateRange::unbounded()).is_some());
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            ttl_secs: 60,
            max_entries: 5,
        };
        let cache = MovementCache::from_config(&config, clock());
        assert_eq!(cache.ttl(), Duration::seconds(60));
    }
}
