use std::time::{Duration, Instant};

/// Caps how often the loop advances to a number of ticks per second
///
/// Pacing is cooperative: callers poll [`FrameLimiter::remaining`], waiting on
/// input for at most that long, and tick once [`FrameLimiter::is_due`].
#[derive(Debug)]
pub struct FrameLimiter {
    last: Instant,
}

impl FrameLimiter {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time between ticks at `rate` ticks per second (a rate of 0 counts as 1)
    #[inline]
    pub fn period(rate: u32) -> Duration {
        Duration::from_secs(1) / rate.max(1)
    }

    /// Time left until the next tick is due
    #[inline]
    pub fn remaining(&self, rate: u32) -> Duration {
        Self::period(rate).saturating_sub(self.last.elapsed())
    }

    #[inline]
    pub fn is_due(&self, rate: u32) -> bool {
        self.remaining(rate).is_zero()
    }

    /// Starts a new period now
    #[inline]
    pub fn mark(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_divides_a_second() {
        assert_eq!(FrameLimiter::period(1), Duration::from_secs(1));
        assert_eq!(FrameLimiter::period(4), Duration::from_millis(250));
        assert_eq!(FrameLimiter::period(0), Duration::from_secs(1));
    }

    #[test]
    fn fresh_limiter_is_not_due() {
        let limiter = FrameLimiter::new();

        assert!(!limiter.is_due(1));
        assert!(limiter.remaining(1) <= Duration::from_secs(1));
    }
}
