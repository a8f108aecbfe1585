//! Per-question countdown
//!
//! Holds the remaining time for the active question. The countdown does not
//! schedule anything itself: an external scheduler calls `tick` once per
//! elapsed second while it is active.

/// Single countdown, restarted for every fresh question
#[derive(Debug, Clone)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
    active: bool,
    generation: u64,
}

impl Countdown {
    /// Create an inactive countdown with the given budget in seconds
    pub fn new(budget: u32) -> Self {
        let budget = budget.max(1);
        Self {
            budget,
            remaining: budget,
            active: false,
            generation: 0,
        }
    }

    /// Restart at the full budget. Bumps the generation so schedulers can
    /// realign their cadence to this countdown.
    pub fn start(&mut self) {
        self.remaining = self.budget;
        self.active = true;
        self.generation += 1;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Consume one second. Returns the new remaining time, or `None` when the
    /// countdown is not running. Reaching zero stops it.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.active {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
        }
        Some(self.remaining)
    }

    /// Show the countdown as spent without running it
    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Remaining time as a fraction of the budget
    pub fn fraction_remaining(&self) -> f64 {
        f64::from(self.remaining) / f64::from(self.budget)
    }
}
