use std::time::{Duration, Instant};

// A zero cadence would make every deadline permanently due.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Recurring advance timer for one carousel.
///
/// The timer is a single optional deadline, so at most one can be live; arming
/// again replaces the pending deadline instead of adding a second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Autoplay {
    /// A disarmed timer with the given cadence.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Arms the timer one interval after `now`. An interval too long to be
    /// represented as a deadline leaves the timer disarmed.
    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.deadline = self.after(now);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn reset(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    /// Consumes one elapsed deadline, scheduling the following one a full
    /// interval later. Returns `false` when disarmed or not yet due.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = self.after(at);
                true
            }
            _ => false,
        }
    }

    /// Like [`fire_if_due`](Self::fire_if_due), but a wake-up that is late by
    /// a whole interval or more fires once and re-arms from `now` instead of
    /// owing every missed deadline.
    pub fn fire_skipping_missed(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = match self.after(at) {
                    Some(next) if next > now => Some(next),
                    _ => self.after(now),
                };
                true
            }
            _ => false,
        }
    }

    fn after(&self, at: Instant) -> Option<Instant> {
        at.checked_add(self.interval)
    }
}
