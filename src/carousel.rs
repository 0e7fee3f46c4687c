//! Per-instance navigation engine shared by the gallery, donor viewer,
//! promotions carousel and announcement bar.
//!
//! Time is passed in explicitly so the engine can be driven by a real timer
//! (see [`crate::tasks::region`]) or by a simulated clock in tests and dry runs.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::autoplay::Autoplay;
use crate::collection::NavigableCollection;
use crate::error::Error;
use crate::events::{ChangeCause, IndexChange};
use crate::indicator::Indicators;

/// Receives every index change of one carousel.
pub trait IndexObserver {
    fn index_changed(&mut self, change: &IndexChange, indicators: &Indicators);
}

impl<F> IndexObserver for F
where
    F: FnMut(&IndexChange, &Indicators),
{
    fn index_changed(&mut self, change: &IndexChange, indicators: &Indicators) {
        self(change, indicators);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    pub interval: Duration,
    /// Arm autoplay on construction.
    pub autoplay: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            autoplay: false,
        }
    }
}

pub struct Carousel<T> {
    items: NavigableCollection<T>,
    current: Option<usize>,
    indicators: Indicators,
    autoplay: Autoplay,
    observers: Vec<Box<dyn IndexObserver + Send>>,
}

impl<T: fmt::Debug> fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("items", &self.items)
            .field("current", &self.current)
            .field("indicators", &self.indicators)
            .field("autoplay", &self.autoplay)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T> Carousel<T> {
    /// Builds an engine positioned on the first item (or idle when empty).
    ///
    /// Autoplay is armed relative to `now` when requested and there is at
    /// least one item.
    pub fn new(items: Vec<T>, options: CarouselOptions, now: Instant) -> Self {
        let items = NavigableCollection::from_vec(items);
        let current = (!items.is_empty()).then_some(0);
        let indicators = Indicators::new(items.len());
        let mut carousel = Self {
            items,
            current,
            indicators,
            autoplay: Autoplay::new(options.interval),
            observers: Vec::new(),
        };
        if options.autoplay {
            carousel.start(now);
        }
        carousel
    }

    pub fn subscribe(&mut self, observer: impl IndexObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Item under the cursor; `None` for an empty collection.
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|idx| self.items.get(idx))
    }

    pub fn items(&self) -> &NavigableCollection<T> {
        &self.items
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    pub fn is_autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn interval(&self) -> Duration {
        self.autoplay.interval()
    }

    /// When the pending automatic advance is due, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.autoplay.deadline()
    }

    /// Jumps to `index`. An armed timer restarts its cadence from `now`.
    ///
    /// # Errors
    /// [`Error::EmptyCollection`] with no items, [`Error::IndexOutOfRange`]
    /// when `index >= len`. The index is never clamped.
    pub fn go_to(&mut self, index: usize, now: Instant) -> Result<IndexChange, Error> {
        let len = self.items.len();
        if len == 0 {
            return Err(Error::EmptyCollection);
        }
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let change = self.apply(index, ChangeCause::User);
        if self.autoplay.is_armed() {
            self.autoplay.reset(now);
        }
        Ok(change)
    }

    /// # Errors
    /// [`Error::EmptyCollection`] with no items.
    pub fn next(&mut self, now: Instant) -> Result<IndexChange, Error> {
        let target = self
            .current
            .and_then(|idx| self.items.following(idx))
            .ok_or(Error::EmptyCollection)?;
        self.go_to(target, now)
    }

    /// # Errors
    /// [`Error::EmptyCollection`] with no items.
    pub fn previous(&mut self, now: Instant) -> Result<IndexChange, Error> {
        let target = self
            .current
            .and_then(|idx| self.items.preceding(idx))
            .ok_or(Error::EmptyCollection)?;
        self.go_to(target, now)
    }

    /// Arms autoplay, replacing any pending deadline. No-op on an empty collection.
    pub fn start(&mut self, now: Instant) {
        if self.items.is_empty() {
            debug!("autoplay not armed: collection is empty");
            return;
        }
        self.autoplay.start(now);
        if self.autoplay.is_armed() {
            trace!(interval = ?self.autoplay.interval(), "autoplay armed");
        } else {
            warn!(interval = ?self.autoplay.interval(), "autoplay not armed: interval too long");
        }
    }

    pub fn stop(&mut self) {
        if self.autoplay.is_armed() {
            trace!("autoplay disarmed");
        }
        self.autoplay.stop();
    }

    pub fn reset(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    /// Pause region entered (hover or focus).
    pub fn pause(&mut self) {
        self.stop();
    }

    /// Pause region left; the cadence restarts from `now`.
    pub fn resume(&mut self, now: Instant) {
        self.reset(now);
    }

    /// Runs every automatic advance whose deadline is at or before `now`.
    pub fn advance_to(&mut self, now: Instant) -> Vec<IndexChange> {
        let mut changes = Vec::new();
        while self.autoplay.fire_if_due(now) {
            let Some(target) = self.current.and_then(|idx| self.items.following(idx)) else {
                self.autoplay.stop();
                break;
            };
            changes.push(self.apply(target, ChangeCause::Autoplay));
        }
        changes
    }

    /// Runs at most one automatic advance. A deadline missed by a whole
    /// interval or more is not made up; the cadence restarts from `now`.
    pub fn tick(&mut self, now: Instant) -> Option<IndexChange> {
        if !self.autoplay.fire_skipping_missed(now) {
            return None;
        }
        let Some(target) = self.current.and_then(|idx| self.items.following(idx)) else {
            self.autoplay.stop();
            return None;
        };
        Some(self.apply(target, ChangeCause::Autoplay))
    }

    fn apply(&mut self, index: usize, cause: ChangeCause) -> IndexChange {
        let change = IndexChange {
            previous: self.current,
            current: index,
            cause,
        };
        self.current = Some(index);
        self.indicators.activate(index);
        trace!(index, cause = ?cause, "index changed");
        for observer in &mut self.observers {
            observer.index_changed(&change, &self.indicators);
        }
        change
    }
}
