//! Page-relative time, deadlines and the resize debouncer
//!
//! Nothing in the core owns a browser timer. Components record deadlines;
//! the runtime asks [`crate::page::SitePage::next_wakeup`] for the earliest one
//! and arms a single timeout for it.

use std::cell::Cell;
use std::ops::Add;
use std::time::Duration;

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Milliseconds since the page started (the `performance.now()` origin)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Convert a `performance.now()` reading; negative and NaN clamp to zero
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Self(ms as u64)
        } else {
            Self::ZERO
        }
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Time remaining until `later`, zero if it already passed
    pub fn until(self, later: Timestamp) -> Duration {
        Duration::from_millis(later.0.saturating_sub(self.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(ms))
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current page time
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, at: Timestamp) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) -> Timestamp {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

// =============================================================================
// DEADLINE
// =============================================================================

/// A single restartable timer slot
///
/// Arming an armed deadline replaces it, so a slot never holds more than one
/// pending firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Timestamp>,
}

impl Deadline {
    pub fn arm(&mut self, now: Timestamp, delay: Duration) {
        self.at = Some(now + delay);
    }

    pub fn at(&self) -> Option<Timestamp> {
        self.at
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Disarm and report true if the deadline has been reached
    pub fn fire_if_due(&mut self, now: Timestamp) -> bool {
        match self.at {
            Some(at) if at <= now => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// DEBOUNCER
// =============================================================================

/// Trailing-edge debouncer
///
/// Each `trigger` pushes the pending invocation out to `now + wait`; `poll`
/// reports true once after the burst has been quiet for `wait`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    pending: Deadline,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: Deadline::default(),
        }
    }

    pub fn trigger(&mut self, now: Timestamp) {
        self.pending.arm(now, self.wait);
    }

    pub fn poll(&mut self, now: Timestamp) -> bool {
        self.pending.fire_if_due(now)
    }

    pub fn pending_until(&self) -> Option<Timestamp> {
        self.pending.at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn test_rearming_replaces_deadline() {
        let mut deadline = Deadline::default();
        deadline.arm(ms(0), Duration::from_millis(100));
        deadline.arm(ms(50), Duration::from_millis(100));

        assert!(!deadline.fire_if_due(ms(100)));
        assert!(deadline.fire_if_due(ms(150)));
        assert!(!deadline.is_armed());
    }

    #[test]
    fn test_debouncer_coalesces_burst() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        for t in [0, 100, 200, 300] {
            debouncer.trigger(ms(t));
            assert!(!debouncer.poll(ms(t)));
        }

        assert!(!debouncer.poll(ms(549)));
        assert!(debouncer.poll(ms(550)));
        assert!(!debouncer.poll(ms(10_000)));
    }

    #[test]
    fn test_from_millis_f64_clamps() {
        assert_eq!(Timestamp::from_millis_f64(-3.0), Timestamp::ZERO);
        assert_eq!(Timestamp::from_millis_f64(f64::NAN), Timestamp::ZERO);
        assert_eq!(Timestamp::from_millis_f64(12.9), ms(12));
    }

    #[test]
    fn test_until_saturates() {
        assert_eq!(ms(500).until(ms(200)), Duration::ZERO);
        assert_eq!(ms(200).until(ms(500)), Duration::from_millis(300));
    }
}
