//! Invulnerability window
//!
//! Inactive until a collectible is picked up, then counts down one tick at a
//! time. Re-collecting refills to full duration; there is no stacking.

use serde::{Deserialize, Serialize};

/// Active/inactive power-up with a tick countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerupTimer {
    active: bool,
    remaining: u32,
}

impl PowerupTimer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ticks left in the window (0 when inactive)
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// (Re)start the window at full duration
    pub fn activate(&mut self, duration: u32) {
        self.active = duration > 0;
        self.remaining = duration;
    }

    /// Advance one tick. Returns true on the tick the window closes.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Remaining fraction in [0, 1] for the HUD bar
    pub fn fraction(&self, duration: u32) -> f32 {
        if !self.active || duration == 0 {
            return 0.0;
        }
        (self.remaining as f32 / duration as f32).clamp(0.0, 1.0)
    }

    pub fn deactivate(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let mut timer = PowerupTimer::new();
        assert!(!timer.is_active());
        assert!(!timer.tick());
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.fraction(300), 0.0);
    }

    #[test]
    fn test_counts_down_and_expires() {
        let mut timer = PowerupTimer::new();
        timer.activate(300);
        assert!(timer.is_active());
        assert_eq!(timer.fraction(300), 1.0);

        for _ in 0..299 {
            assert!(!timer.tick());
            assert!(timer.is_active());
        }
        assert_eq!(timer.remaining(), 1);
        assert!(timer.tick());
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_refill_does_not_stack() {
        let mut timer = PowerupTimer::new();
        timer.activate(300);
        for _ in 0..120 {
            timer.tick();
        }
        assert_eq!(timer.remaining(), 180);

        timer.activate(300);
        assert_eq!(timer.remaining(), 300);
        timer.activate(300);
        assert_eq!(timer.remaining(), 300);
    }

    #[test]
    fn test_fraction_halfway() {
        let mut timer = PowerupTimer::new();
        timer.activate(300);
        for _ in 0..150 {
            timer.tick();
        }
        assert!((timer.fraction(300) - 0.5).abs() < 1e-6);
    }
}
