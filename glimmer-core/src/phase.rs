//! Color phase
//!
//! A free-running hue shared by every effect. It steps by one whenever at
//! least one cadence has elapsed since the previous step, and the reference
//! point moves to the time of the check. A late check therefore advances
//! only once: boundaries missed during a blocking blast are dropped, not
//! caught up.

use crate::traits::time::elapsed_ms;

/// Wrapping hue advanced on a wall-clock cadence
#[derive(Debug, Clone)]
pub struct HuePhase {
    hue: u8,
    cadence_ms: u32,
    last_step_ms: u32,
}

impl HuePhase {
    /// Start at hue 0 with the cadence measured from `now`
    pub fn new(cadence_ms: u32, now: u32) -> Self {
        Self {
            hue: 0,
            cadence_ms,
            last_step_ms: now,
        }
    }

    /// Current hue
    pub fn hue(&self) -> u8 {
        self.hue
    }

    /// Advance the hue if a cadence boundary has been crossed
    ///
    /// Returns true if the hue changed.
    pub fn advance(&mut self, now: u32) -> bool {
        if elapsed_ms(now, self.last_step_ms) >= self.cadence_ms {
            self.last_step_ms = now;
            self.hue = self.hue.wrapping_add(1);
            true
        } else {
            false
        }
    }
}
