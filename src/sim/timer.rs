//! Periodic tasks on a virtual clock
//!
//! Nothing here reads wall-clock time; callers feed elapsed time in and get
//! back how many periods completed.

use std::time::Duration;

/// A repeating timer that can be stopped
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    running: bool,
}

impl Interval {
    /// Start a timer with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Advance the clock and return the number of times the timer fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    /// Stop firing. Stopped timers ignore `advance`.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = Interval::new(Duration::from_millis(100));
        assert_eq!(timer.advance(Duration::from_millis(60)), 0);
        assert_eq!(timer.advance(Duration::from_millis(60)), 1);
        // 20 ms carried over
        assert_eq!(timer.advance(Duration::from_millis(80)), 1);
        assert_eq!(timer.advance(Duration::from_millis(99)), 0);
    }

    #[test]
    fn test_long_frame_fires_repeatedly() {
        let mut timer = Interval::new(Duration::from_millis(500));
        assert_eq!(timer.advance(Duration::from_millis(1750)), 3);
        assert_eq!(timer.advance(Duration::from_millis(250)), 1);
    }

    #[test]
    fn test_stopped_timer_is_silent() {
        let mut timer = Interval::new(Duration::from_millis(100));
        timer.advance(Duration::from_millis(90));
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut timer = Interval::new(Duration::ZERO);
        assert_eq!(timer.advance(Duration::from_secs(1)), 0);
    }
}
