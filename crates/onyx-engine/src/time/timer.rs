use std::time::{Duration, Instant};

/// Wall-clock interval measurement between sampling points.
///
/// `mark` moves the sampling point; `peek` only looks. Both read a monotonic
/// clock, so neither can go negative.
#[derive(Debug, Clone)]
pub struct Timer {
    last: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Seconds since the previous sampling point. Resets the sampling point to now.
    pub fn mark(&mut self) -> f32 {
        self.mark_duration().as_secs_f32()
    }

    /// Seconds since the sampling point, without resetting it.
    pub fn peek(&self) -> f32 {
        self.peek_duration().as_secs_f32()
    }

    pub(crate) fn mark_duration(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }

    pub(crate) fn peek_duration(&self) -> Duration {
        Instant::now().saturating_duration_since(self.last)
    }

    /// Timestamp of the current sampling point.
    pub fn last(&self) -> Instant {
        self.last
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fresh_timer_is_non_negative() {
        let t = Timer::new();
        assert!(t.peek() >= 0.0);
    }

    #[test]
    fn mark_measures_interval() {
        let mut t = Timer::new();
        thread::sleep(Duration::from_millis(20));
        let dt = t.mark();
        assert!(dt >= 0.02, "dt = {dt}");
    }

    #[test]
    fn mark_resets_sampling_point() {
        let mut t = Timer::new();
        thread::sleep(Duration::from_millis(20));
        let before = t.last();
        t.mark();
        assert!(t.last() > before);
        assert!(t.peek() < 0.02);
        assert!(t.mark() >= 0.0);
    }

    #[test]
    fn peek_does_not_reset() {
        let t = Timer::new();
        let base = t.last();
        thread::sleep(Duration::from_millis(5));
        let first = t.peek();
        let second = t.peek();
        assert_eq!(t.last(), base);
        assert!(second >= first);
        assert!(first >= 0.005);
    }

    #[test]
    fn consecutive_marks_never_negative() {
        let mut t = Timer::new();
        for _ in 0..1000 {
            assert!(t.mark() >= 0.0);
            assert!(t.peek() >= 0.0);
        }
    }
}
