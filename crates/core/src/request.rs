//! Guard against out-of-order responses.
//!
//! Every reload takes a ticket; a response is applied only if its ticket is
//! still the newest one handed out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Sequence number of this ticket.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets.
///
/// Clones share the same sequence.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    /// Creates a tracker that has issued nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest request.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_clones_share_sequence() {
        let tracker = RequestTracker::new();
        let other = tracker.clone();
        let ticket = tracker.begin();
        other.begin();
        assert!(!tracker.is_current(ticket));
        assert_eq!(ticket.sequence(), 1);
    }
}
