/// Fixed-rate simulation stepping.
///
/// `FixedTimestep` turns measured frame time into a whole number of logic
/// ticks; the fractional remainder carries over to the next frame so the
/// tick rate holds no matter how rendering jitters.  After a stall the
/// frame time is clamped and at most `MAX_TICKS_PER_FRAME` ticks run; the
/// rest of the backlog is dropped.

use std::time::Duration;

use tracing::debug;

pub const DEFAULT_TICK_RATE: u32 = 60;
/// Longest frame time banked in one call (raised to one tick for slow rates).
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);
pub const MAX_TICKS_PER_FRAME: u32 = 5;

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Clone, Debug)]
pub struct FixedTimestep {
    tick_nanos: u128,
    /// Time banked towards the next tick.
    accumulated: u128,
}

impl FixedTimestep {
    /// `ticks_per_second` of 0 is treated as 1.
    pub fn new(ticks_per_second: u32) -> Self {
        let tps = u128::from(ticks_per_second.max(1));
        Self {
            tick_nanos: NANOS_PER_SEC / tps,
            accumulated: 0,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(self.tick_nanos as u64)
    }

    /// Bank `elapsed` and return how many ticks to run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let max_delta = MAX_FRAME_DELTA.max(self.tick_duration());
        self.accumulated += elapsed.min(max_delta).as_nanos();
        let due = self.accumulated / self.tick_nanos;
        if due > u128::from(MAX_TICKS_PER_FRAME) {
            let run = u128::from(MAX_TICKS_PER_FRAME) * self.tick_nanos;
            let dropped_ms = ((self.accumulated - run) / 1_000_000) as u64;
            debug!(dropped_ms, "tick backlog dropped");
            self.accumulated = 0;
            return MAX_TICKS_PER_FRAME;
        }
        self.accumulated %= self.tick_nanos;
        due as u32
    }
}

/// Frames and ticks counted over one-second windows.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    window_start_ms: u64,
    frames: u32,
    ticks: u32,
    last_rates: Option<(u32, u32)>,
}

impl FrameStats {
    pub fn new(now_ms: u64) -> Self {
        Self {
            window_start_ms: now_ms,
            ..Self::default()
        }
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    pub fn record_ticks(&mut self, ticks: u32) {
        self.ticks += ticks;
    }

    /// Close the window once a second has passed.  Returns `(fps, tps)` for
    /// the window just closed.
    pub fn roll(&mut self, now_ms: u64) -> Option<(u32, u32)> {
        if now_ms.saturating_sub(self.window_start_ms) < 1000 {
            return None;
        }
        let rates = (self.frames, self.ticks);
        self.window_start_ms += 1000;
        self.frames = 0;
        self.ticks = 0;
        self.last_rates = Some(rates);
        Some(rates)
    }

    /// `(fps, tps)` from the last completed window.
    pub fn last_rates(&self) -> Option<(u32, u32)> {
        self.last_rates
    }
}
