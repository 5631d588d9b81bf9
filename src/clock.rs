/// Time sources for the game loop.  Weapon and switch timers only ever see
/// plain millisecond values, so anything implementing `Clock` can drive them.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Time since the clock started.
    fn now(&self) -> Duration;

    fn now_ms(&self) -> u64 {
        self.now().as_millis() as u64
    }
}

/// Wall-clock time, counted from construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.set(Duration::from_millis(ms));
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
