//! Deferred resolution timer.
//!
//! A flipped chit stays visible for a short delay before its effect is
//! applied. The timer never blocks: the host calls `tick` with the time that
//! passed, and the timer reports once that the delay has elapsed.

use std::time::Duration;

/// Default delay between a chit becoming visible and its resolution.
pub const DEFAULT_FLIP_DELAY: Duration = Duration::from_millis(1500);

/// One-shot countdown checked once per engine tick.
#[derive(Clone, Debug)]
pub struct FlipTimer {
    delay: Duration,
    remaining: Option<Duration>,
}

impl FlipTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    /// Start counting down. Has no effect while already armed.
    pub fn activate(&mut self) {
        if self.remaining.is_none() {
            self.remaining = Some(self.delay);
        }
    }

    /// Whether a countdown is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Advance by `elapsed`. Returns true exactly once, on the tick where the
    /// countdown reaches zero; the timer is disarmed at that point.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            None => false,
            Some(remaining) if elapsed >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - elapsed);
                false
            }
        }
    }
}

impl Default for FlipTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = FlipTimer::default();
        assert!(!timer.is_active());
        assert!(!timer.tick(Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = FlipTimer::new(Duration::from_millis(1500));
        timer.activate();

        assert!(!timer.tick(Duration::from_millis(1000)));
        assert!(timer.is_active());
        assert!(timer.tick(Duration::from_millis(500)));
        assert!(!timer.is_active());
        assert!(!timer.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_activate_while_armed_keeps_countdown() {
        let mut timer = FlipTimer::new(Duration::from_millis(100));
        timer.activate();
        assert!(!timer.tick(Duration::from_millis(60)));
        timer.activate();
        assert!(timer.tick(Duration::from_millis(40)));
    }

    #[test]
    fn test_zero_delay_fires_on_first_tick() {
        let mut timer = FlipTimer::new(Duration::ZERO);
        timer.activate();
        assert!(timer.tick(Duration::ZERO));
    }
}
