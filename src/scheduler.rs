use std::time::{Duration, Instant};

/// Fixed-period tick schedule that can be cancelled and restarted.
///
/// A late poll fires exactly once and the next deadline is measured from the
/// poll instant, so time spent stalled or paused never produces catch-up
/// ticks.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// (Re)starts the schedule with a full period from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stops the schedule.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a tick is due at `now`, rescheduling from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when stopped.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(PERIOD);
        let now = Instant::now();

        assert!(!ticker.poll(now + PERIOD * 10));
        assert_eq!(ticker.time_until_due(now), None);
    }

    #[test]
    fn fires_once_per_period() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);

        assert!(!ticker.poll(start + Duration::from_millis(149)));
        assert!(ticker.poll(start + PERIOD));
        assert!(!ticker.poll(start + PERIOD + Duration::from_millis(10)));
        assert!(ticker.poll(start + PERIOD * 2));
    }

    #[test]
    fn long_stall_does_not_catch_up() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);

        let late = start + PERIOD * 20;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn cancel_then_restart_uses_fresh_period() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);
        ticker.cancel();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(start + PERIOD * 3));

        let resumed = start + PERIOD * 3;
        ticker.start(resumed);
        assert!(!ticker.poll(resumed + Duration::from_millis(100)));
        assert!(ticker.poll(resumed + PERIOD));
    }
}
