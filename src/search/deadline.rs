//! Wall-clock deadlines polled by every search loop.

use std::time::{Duration, Instant};

/// A point in time minus a safety margin.
///
/// Searches poll [`Deadline::expired`] after each unit of work and at every
/// recursive call; nothing interrupts them from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    margin: Duration,
}

impl Deadline {
    /// Deadline at `at` with no margin.
    #[must_use]
    pub fn new(at: Instant) -> Self {
        Self {
            at,
            margin: Duration::ZERO,
        }
    }

    /// Deadline `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self::new(Instant::now() + budget)
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn at(&self) -> Instant {
        self.at
    }

    #[must_use]
    pub fn margin(&self) -> Duration {
        self.margin
    }

    /// Time until the deadline itself, zero once passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// True once the remaining time is within the margin.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining() <= self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_deadline_not_expired() {
        let deadline = Deadline::after(Duration::from_secs(60));
        assert!(!deadline.expired());
        assert!(deadline.remaining() > Duration::from_secs(59));
    }

    #[test]
    fn test_past_deadline_expired() {
        let deadline = Deadline::new(Instant::now());
        std::thread::sleep(Duration::from_millis(1));
        assert!(deadline.expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_margin_brings_expiry_forward() {
        let deadline =
            Deadline::after(Duration::from_secs(1)).with_margin(Duration::from_secs(5));
        assert!(deadline.expired());
        assert_eq!(deadline.margin(), Duration::from_secs(5));
    }
}
