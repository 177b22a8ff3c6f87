//! Logical time for the timer-driven effects.
//!
//! The browser shell feeds real timestamps (milliseconds from
//! `performance.now()`); tests drive a [`ManualClock`] instead so repeating
//! ticks and delays can be stepped deterministically.

use std::cell::Cell;

/// Milliseconds since an arbitrary origin.
pub type Millis = f64;

/// Host timers may fire this far ahead of the timestamp they were set for.
pub const TIMER_SLACK: Millis = 1.0;

pub trait Clock {
    fn now(&self) -> Millis;
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

/// A repeating tick, first firing one full `interval` after it is started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    interval: Millis,
    next_due: Millis,
}

impl Ticker {
    pub fn start(now: Millis, interval: Millis) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Number of ticks due at `now`; schedules the next one after them.
    pub fn fire_due(&mut self, now: Millis) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        let mut fired = 0;
        while self.next_due <= now + TIMER_SLACK {
            self.next_due += self.interval;
            fired += 1;
        }
        fired
    }
}

/// A one-shot delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    due: Millis,
}

impl Deadline {
    pub fn after(now: Millis, delay: Millis) -> Self {
        Self { due: now + delay }
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now + TIMER_SLACK >= self.due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_waits_a_full_interval() {
        let clock = ManualClock::new(100.0);
        let mut t = Ticker::start(clock.now(), 50.0);
        clock.advance(48.0);
        assert_eq!(t.fire_due(clock.now()), 0);
        clock.advance(2.0);
        assert_eq!(t.fire_due(clock.now()), 1);
        assert_eq!(t.fire_due(clock.now()), 0);
    }

    #[test]
    fn ticker_catches_up_after_a_stall() {
        let mut t = Ticker::start(0.0, 10.0);
        assert_eq!(t.fire_due(35.0), 3);
        assert_eq!(t.fire_due(40.0), 1);
    }

    #[test]
    fn deadline_is_due_at_boundary() {
        let d = Deadline::after(0.0, 1500.0);
        assert!(!d.is_due(1000.0));
        assert!(!d.is_due(1500.0 - TIMER_SLACK - 0.1));
        assert!(d.is_due(1500.0));
    }

    #[test]
    fn timers_firing_slightly_early_still_count() {
        let mut t = Ticker::start(0.0, 4000.0);
        assert_eq!(t.fire_due(3999.6), 1);
        assert_eq!(t.fire_due(7999.5), 1);
        assert!(Deadline::after(0.0, 1500.0).is_due(1499.5));
    }
}
