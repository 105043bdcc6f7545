use std::time::{Duration, Instant};

/// Single-shot restartable timer, polled from the frame loop.
///
/// Every `trigger` pushes the deadline out to `now + delay`; `poll` fires once
/// after the deadline passes. A burst of triggers therefore fires exactly once.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once per expired deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending deadline, for scheduling a repaint
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);

        assert!(!debouncer.poll(start + Duration::from_millis(99)));
        assert!(debouncer.poll(start + DELAY));
        assert!(!debouncer.poll(start + Duration::from_millis(500)));
        assert_eq!(debouncer.remaining(start + DELAY), None);
    }

    #[test]
    fn test_burst_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(60));
        debouncer.trigger(start + Duration::from_millis(120));

        // Original deadline has passed but the timer was restarted
        assert!(!debouncer.poll(start + Duration::from_millis(150)));
        assert!(debouncer.poll(start + Duration::from_millis(220)));
        assert!(!debouncer.poll(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_remaining_counts_down() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        assert_eq!(debouncer.remaining(start), None);

        debouncer.trigger(start);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(150)),
            Some(Duration::ZERO)
        );
    }
}
