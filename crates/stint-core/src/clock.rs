//! Wall-clock and tick scheduling abstractions.
//!
//! The timer never counts ticks. It derives elapsed time from a wall-clock
//! anchor, so the only things it needs from the outside world are "what time
//! is it" ([`Clock`]) and "call me back roughly once a second" ([`Scheduler`]).

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

// ========== Clock ==========

/// A source of the current wall-clock time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// a session and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    /// Moves the clock forward (or backward, for a negative delta).
    pub fn advance(&self, by: TimeDelta) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.advance(TimeDelta::seconds(secs));
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, to: DateTime<Utc>) {
        self.millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

// ========== Scheduler ==========

/// Starts the recurring once-per-second tick while a session is running.
///
/// The returned handle owns the scheduled task. Dropping it must cancel the
/// task so that no further ticks are delivered for that run.
pub trait Scheduler {
    /// Handle to a live recurring tick.
    type Handle;

    /// Schedules a new recurring tick.
    fn start(&self) -> Self::Handle;
}

/// A scheduler that never delivers ticks on its own.
///
/// Useful for headless callers that dispatch ticks themselves (or never need
/// them: stopping the timer computes the final value from the anchor anyway).
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTicks;

impl Scheduler for ManualTicks {
    type Handle = ();

    fn start(&self) -> Self::Handle {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn manual_clock_is_frozen_until_advanced() {
        let clock = ManualClock::new(start());
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), start());

        clock.advance_secs(90);
        assert_eq!(clock.now(), start() + TimeDelta::seconds(90));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(start());
        let handle = clock.clone();

        handle.advance(TimeDelta::milliseconds(1500));
        assert_eq!(clock.now(), start() + TimeDelta::milliseconds(1500));

        handle.set(start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
