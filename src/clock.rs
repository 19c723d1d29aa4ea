//! Time sources for the cache.
//!
//! A [`Clock`] returns the time elapsed since some fixed origin. The cache only
//! ever subtracts two readings, so the origin is irrelevant; what matters is
//! that readings never go backwards and advance at real-time rate (or, for
//! [`ManualClock`], exactly when told to).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A zero-argument "current time" query.
pub trait Clock {
    /// Current time as an offset from the clock's origin.
    fn now(&self) -> Duration;
}

impl<F> Clock for F
where
    F: Fn() -> Duration,
{
    fn now(&self) -> Duration {
        self()
    }
}

/// Monotonic wall-rate clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a caller can hand one handle to a
/// [`FileCache`](crate::cache::FileCache) and keep another to drive it.
///
/// ```
/// use filecache::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock reading `start`.
    #[must_use]
    pub fn starting_at(start: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute time. Moving backwards is the caller's problem.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move forward by `by`, stopping at `Duration::MAX`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
