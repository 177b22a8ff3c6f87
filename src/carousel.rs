//! Auto-advancing carousel with hover pause.

use crate::timing::{Millis, Ticker};

#[derive(Debug, Clone)]
pub struct Carousel {
    index: usize,
    item_count: usize,
    gap: f64,
    interval: Millis,
    ticker: Option<Ticker>,
}

impl Carousel {
    /// A carousel whose autoplay starts at `now`.
    pub fn new(item_count: usize, gap: f64, interval: Millis, now: Millis) -> Self {
        Self {
            index: 0,
            item_count,
            gap,
            interval,
            ticker: Some(Ticker::start(now, interval)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        if item_count > 0 {
            self.index %= item_count;
        } else {
            self.index = 0;
        }
    }

    /// Advance one slide. Returns the track's horizontal translation in
    /// pixels, or `None` when paused or there is nothing to slide.
    pub fn tick(&mut self, item_width: f64) -> Option<f64> {
        if !self.is_playing() || self.item_count == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.item_count;
        Some(self.offset(item_width))
    }

    /// Translation for the current index.
    pub fn offset(&self, item_width: f64) -> f64 {
        -(self.index as f64 * (item_width + self.gap))
    }

    /// Run every tick due at `now`; returns the last offset to write, if any.
    /// The browser calls this from its interval timer.
    pub fn advance(&mut self, now: Millis, item_width: f64) -> Option<f64> {
        let fired = self.ticker.as_mut().map_or(0, |t| t.fire_due(now));
        let mut last = None;
        for _ in 0..fired {
            last = self.tick(item_width).or(last);
        }
        last
    }

    /// Pointer entered the carousel: drop the running timer.
    pub fn pointer_enter(&mut self) {
        self.ticker = None;
    }

    /// Pointer left: start a fresh timer, a full interval from `now`.
    pub fn pointer_leave(&mut self, now: Millis) {
        self.ticker = Some(Ticker::start(now, self.interval));
    }
}
