use std::time::Duration;

/// Adaptive poll cadence for draining the event bus.
///
/// Polls fast right after activity and backs off to the slow interval once
/// `idle_threshold` consecutive polls came back empty.
#[derive(Debug, Clone)]
pub(super) struct MicroTicker {
    fast:           Duration,
    slow:           Duration,
    idle_threshold: u8,
    idle_polls:     u8
}

impl MicroTicker {
    pub(super) fn new(fast: Duration, slow: Duration, idle_threshold: u8) -> Self {
        Self {
            fast,
            slow,
            idle_threshold,
            idle_polls: 0
        }
    }

    pub(super) fn interval(&self) -> Duration {
        if self.idle_polls >= self.idle_threshold {
            self.slow
        } else {
            self.fast
        }
    }

    pub(super) fn observe(&mut self, active: bool) {
        self.idle_polls = if active {
            0
        } else {
            self.idle_polls.saturating_add(1).min(self.idle_threshold)
        };
    }
}

impl Default for MicroTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(16), Duration::from_millis(100), 3)
    }
}
