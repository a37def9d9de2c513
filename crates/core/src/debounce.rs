//! Quiet-period debouncing for the search box.
//!
//! Time is passed in by the caller so bursts can be replayed in tests.

use chrono::{DateTime, Duration, Utc};
use finnza_shared::config::SearchConfig;

/// Default quiet period in milliseconds.
pub const DEFAULT_QUIET_MS: u64 = 500;

/// Coalesces a burst of inputs into one emission.
///
/// A value is emitted once `quiet` has passed since the last push, and only
/// when it differs from the previously emitted value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, DateTime<Utc>)>,
    last_emitted: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Creates a debouncer with a quiet period of `quiet_ms`.
    #[must_use]
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet: Duration::milliseconds(i64::try_from(quiet_ms).unwrap_or(i64::MAX)),
            pending: None,
            last_emitted: None,
        }
    }

    /// Creates a debouncer from the `search` configuration section.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.debounce_ms)
    }

    /// Records the latest input, restarting the quiet period.
    pub fn push(&mut self, value: T, now: DateTime<Utc>) {
        self.pending = Some((value, now));
    }

    /// Emits the pending value once it has been quiet long enough.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        let (_, pushed_at) = self.pending.as_ref()?;
        if now - *pushed_at < self.quiet {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.last_emitted.as_ref() == Some(&value) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }

    /// Whether an input is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending input becomes due.
    #[must_use]
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    /// Drops any pending input and forgets the last emission.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emitted = None;
    }
}

impl<T: Clone + PartialEq> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 18, 9, 0, 0).unwrap()
    }

    fn ms(n: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(n)
    }

    #[test]
    fn test_burst_coalesces_to_last_value() {
        let mut d = Debouncer::default();
        d.push("a".to_string(), ms(0));
        d.push("ac".to_string(), ms(100));
        d.push("acm".to_string(), ms(250));

        assert_eq!(d.poll(ms(600)), None);
        assert_eq!(d.due_at(), Some(ms(750)));
        assert_eq!(d.poll(ms(750)), Some("acm".to_string()));
        assert_eq!(d.poll(ms(2000)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_distinct_until_changed() {
        let mut d = Debouncer::new(500);
        d.push("acme", ms(0));
        assert_eq!(d.poll(ms(500)), Some("acme"));

        d.push("acm", ms(600));
        d.push("acme", ms(700));
        assert_eq!(d.poll(ms(1300)), None);

        d.push("", ms(1400));
        assert_eq!(d.poll(ms(1900)), Some(""));
    }

    #[test]
    fn test_reset_forgets_last_emission() {
        let mut d = Debouncer::new(500);
        d.push(1, ms(0));
        assert_eq!(d.poll(ms(500)), Some(1));
        d.reset();
        d.push(1, ms(600));
        assert_eq!(d.poll(ms(1100)), Some(1));
    }

    #[test]
    fn test_from_config() {
        let mut d = Debouncer::from_config(&SearchConfig { debounce_ms: 50 });
        d.push(7, ms(0));
        assert_eq!(d.poll(ms(50)), Some(7));
    }
}
