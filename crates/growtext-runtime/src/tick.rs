#![forbid(unsafe_code)]

//! Periodic tick scheduling.
//!
//! The loop asks the timer how long it may block on input and whether a
//! tick is due. Every method has an `_at(now)` form so tests can drive time
//! by hand.

use std::time::{Duration, Instant};

/// A repeating timer with an optional period.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    rate: Option<Duration>,
    last: Instant,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer {
    /// A timer with no period; it never fires.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rate: None,
            last: Instant::now(),
        }
    }

    #[must_use]
    pub fn rate(&self) -> Option<Duration> {
        self.rate
    }

    /// (Re)schedule with period `rate`, counting from now.
    pub fn schedule(&mut self, rate: Duration) {
        self.schedule_at(rate, Instant::now());
    }

    pub fn schedule_at(&mut self, rate: Duration, now: Instant) {
        self.rate = (!rate.is_zero()).then_some(rate);
        self.last = now;
    }

    pub fn cancel(&mut self) {
        self.rate = None;
    }

    /// How long input polling may block: the time left until the next tick,
    /// or `idle` when nothing is scheduled.
    #[must_use]
    pub fn timeout(&self, idle: Duration) -> Duration {
        self.timeout_at(idle, Instant::now())
    }

    #[must_use]
    pub fn timeout_at(&self, idle: Duration, now: Instant) -> Duration {
        match self.rate {
            Some(rate) => rate.saturating_sub(now.saturating_duration_since(self.last)),
            None => idle,
        }
    }

    /// True once per elapsed period; the period restarts when it fires.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.rate {
            Some(rate) if now.saturating_duration_since(self.last) >= rate => {
                self.last = now;
                true
            }
            _ => false,
        }
    }
}
