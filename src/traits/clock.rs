//! Time source for deadline checks.

use core::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;

/// Supplies the current time.
///
/// The [`Router`](crate::router::Router) reads it once at the start of
/// every call and compares it against the caller's deadline.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch.
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Timestamp::new(seconds)
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a test advance time through the shared
/// reference returned by [`Router::clock`](crate::router::Router::clock).
///
/// ```
/// use pairdex::domain::Timestamp;
/// use pairdex::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::new(Timestamp::new(100));
/// clock.advance(5);
/// assert_eq!(clock.now(), Timestamp::new(105));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Creates a clock stopped at `now`.
    #[must_use]
    pub const fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    /// Moves the clock forward by `seconds`, saturating.
    pub fn advance(&self, seconds: u64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_set_and_advance() {
        let clock = ManualClock::new(Timestamp::new(10));
        assert_eq!(clock.now(), Timestamp::new(10));
        clock.set(Timestamp::new(50));
        clock.advance(7);
        assert_eq!(clock.now(), Timestamp::new(57));
        clock.set(Timestamp::MAX);
        clock.advance(1);
        assert_eq!(clock.now(), Timestamp::MAX);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > Timestamp::new(1_577_836_800));
    }
}
