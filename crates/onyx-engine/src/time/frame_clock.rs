use std::time::{Duration, Instant};

use super::Timer;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Wall-clock time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// `dt` clamped to the clock's bounds, for steps that must stay stable
    /// across stalls.
    pub dt_clamped: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `dt` is the raw interval between ticks. `dt_clamped` bounds it, which avoids
/// pathological steps when the application is paused by the debugger, minimized,
/// or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    timer: Timer,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (100us to 250ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            timer: Timer::new(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    pub fn reset(&mut self) {
        self.timer.mark();
    }

    /// Seconds since the last tick, unclamped.
    pub fn peek(&self) -> f32 {
        self.timer.peek()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = self.timer.mark_duration();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            dt_clamped: dt.clamp(self.dt_min, self.dt_max).as_secs_f32(),
            now: self.timer.last(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
