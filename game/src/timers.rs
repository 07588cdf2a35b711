use std::time::Duration;

/// Which way the timeline scrolls while a card hovers near one of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDir {
    Left,
    Right,
}

impl ScrollDir {
    pub fn sign(self) -> i32 {
        match self {
            ScrollDir::Left => -1,
            ScrollDir::Right => 1,
        }
    }
}

/// Keeps the ✅/❌ indicator up for a fixed time.
///
/// Showing it again restarts the countdown; nothing else can hide it early. Purely
/// presentational: the game never waits on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTimer {
    duration: Duration,
    elapsed: Duration,
    showing: Option<bool>,
}

impl FeedbackTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            showing: None,
        }
    }

    pub fn show(&mut self, accepted: bool) {
        self.elapsed = Duration::ZERO;
        self.showing = Some(accepted);
    }

    /// `Some(accepted)` while the indicator is up.
    pub fn showing(&self) -> Option<bool> {
        self.showing
    }

    pub fn remaining(&self) -> Duration {
        match self.showing {
            Some(_) => self.duration.saturating_sub(self.elapsed),
            None => Duration::ZERO,
        }
    }

    /// Advances the countdown. Returns true on the tick the indicator should disappear.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.showing.is_none() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.showing = None;
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}

/// Periodic edge scroll, alive only while a drag hovers near a timeline edge.
///
/// The driver stores it in an `Option` and drops it on every drag exit.
#[derive(Debug)]
pub struct AutoScroll {
    dir: ScrollDir,
    interval: Duration,
    elapsed: Duration,
    step_px: u32,
}

impl AutoScroll {
    pub fn new(dir: ScrollDir, interval: Duration, step_px: u32) -> Self {
        tracing::trace!(?dir, "autoscroll started");
        Self {
            dir,
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            step_px,
        }
    }

    pub fn dir(&self) -> ScrollDir {
        self.dir
    }

    /// Keeps the accumulated time when only the direction changes.
    pub fn retarget(&mut self, dir: ScrollDir) {
        self.dir = dir;
    }

    /// Advances the timer and returns the signed pixel delta for all ticks that fired.
    pub fn tick(&mut self, dt: Duration) -> i32 {
        let elapsed = self.elapsed.saturating_add(dt).as_nanos();
        let interval = self.interval.as_nanos();
        let remainder = u64::try_from(elapsed % interval).unwrap_or(u64::MAX);
        self.elapsed = Duration::from_nanos(remainder);
        let fired = i32::try_from(elapsed / interval).unwrap_or(i32::MAX);
        let step = i32::try_from(self.step_px).unwrap_or(i32::MAX);
        fired.saturating_mul(step).saturating_mul(self.dir.sign())
    }
}

impl Drop for AutoScroll {
    fn drop(&mut self) {
        tracing::trace!(dir = ?self.dir, "autoscroll cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_hides_after_its_duration() {
        let mut t = FeedbackTimer::new(Duration::from_millis(1_500));
        assert!(!t.tick(Duration::from_secs(5)));

        t.show(true);
        assert_eq!(t.showing(), Some(true));
        assert!(!t.tick(Duration::from_millis(1_000)));
        assert_eq!(t.remaining(), Duration::from_millis(500));
        assert!(t.tick(Duration::from_millis(500)));
        assert_eq!(t.showing(), None);
    }

    #[test]
    fn showing_again_restarts_the_countdown() {
        let mut t = FeedbackTimer::new(Duration::from_millis(1_500));
        t.show(true);
        t.tick(Duration::from_millis(1_200));
        t.show(false);
        assert!(!t.tick(Duration::from_millis(1_200)));
        assert_eq!(t.showing(), Some(false));
    }

    #[test]
    fn autoscroll_fires_once_per_interval() {
        let mut s = AutoScroll::new(ScrollDir::Right, Duration::from_millis(16), 8);
        assert_eq!(s.tick(Duration::from_millis(10)), 0);
        assert_eq!(s.tick(Duration::from_millis(10)), 8);
        assert_eq!(s.tick(Duration::from_millis(32)), 16);

        s.retarget(ScrollDir::Left);
        assert_eq!(s.tick(Duration::from_millis(16)), -8);
    }

    #[test]
    fn long_stall_fires_every_missed_interval_at_once() {
        let mut s = AutoScroll::new(ScrollDir::Right, Duration::from_millis(1), 2);
        assert_eq!(s.tick(Duration::from_micros(10_000_400)), 20_000);
        // The leftover 0.4 ms carries into the next tick.
        assert_eq!(s.tick(Duration::from_micros(600)), 2);

        let mut huge = AutoScroll::new(ScrollDir::Left, Duration::from_millis(1), 8);
        assert_eq!(huge.tick(Duration::from_secs(u64::MAX / 2)), i32::MIN + 1);
    }
}
