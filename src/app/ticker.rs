//! One-second tick scheduler for the session countdown
//!
//! Converts wall-clock time into whole elapsed periods. Each time the session
//! starts a new countdown the ticker realigns, so the first tick lands one
//! full period after the question appeared.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last_tick: Instant,
    generation: Option<u64>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: Instant::now(),
            generation: None,
        }
    }

    /// Align to the countdown identified by `generation`; a no-op when
    /// already aligned to it
    pub fn align(&mut self, generation: u64, now: Instant) {
        if self.generation != Some(generation) {
            self.generation = Some(generation);
            self.last_tick = now;
        }
    }

    /// Number of whole periods elapsed since the last call
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now.saturating_duration_since(self.last_tick) >= self.period {
            self.last_tick += self.period;
            ticks += 1;
        }
        ticks
    }

    /// Time left until the next tick is due
    pub fn until_next(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
