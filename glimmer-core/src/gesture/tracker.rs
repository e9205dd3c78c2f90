//! Hold tracker
//!
//! Two-state machine driven by one touch sample per tick:
//!
//! ```text
//!            Pressed                      Pressed
//!   ┌──────┐ ───────────────▶ ┌─────────┐ ◀──┐
//!   │ Idle │                  │ Holding │ ───┘
//!   └──────┘ ◀─────────────── └─────────┘
//!      ▲  │      Released
//!      └──┘      (reports hold duration)
//!    Released
//! ```
//!
//! The reported hold duration stays pending until the scheduler takes it,
//! so a single release can trigger at most one blast.

use super::sampler::TouchState;
use crate::traits::time::elapsed_ms;

/// Tracker states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureState {
    /// No press in progress
    #[default]
    Idle,
    /// Press in progress since the given time (ms)
    Holding { since: u32 },
}

/// Transition reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureEvent {
    /// Touch started
    Pressed,
    /// Touch ended after being held for the given time (ms)
    Released { held_ms: u32 },
}

impl GestureState {
    /// Process one sample and return the next state and any transition
    pub fn transition(self, touch: TouchState, now: u32) -> (Self, Option<GestureEvent>) {
        use GestureState::*;
        use TouchState::*;

        match (self, touch) {
            (Idle, Pressed) => (Holding { since: now }, Some(GestureEvent::Pressed)),
            (Holding { since }, Released) => (
                Idle,
                Some(GestureEvent::Released {
                    held_ms: elapsed_ms(now, since),
                }),
            ),
            // Holding while pressed, idle while released: nothing to do
            _ => (self, None),
        }
    }
}

/// Press/hold/release tracker
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: GestureState,
    pending_release: Option<u32>,
}

impl GestureTracker {
    /// Create a tracker in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample
    ///
    /// Must run once per tick before any gesture-dependent decision, so a
    /// release seen this tick can act this tick.
    pub fn update(&mut self, touch: TouchState, now: u32) -> Option<GestureEvent> {
        let (next, event) = self.state.transition(touch, now);
        self.state = next;

        if let Some(GestureEvent::Released { held_ms }) = event {
            self.pending_release = Some(held_ms);
        }

        event
    }

    /// Current state
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Check if a press is in progress
    pub fn is_holding(&self) -> bool {
        matches!(self.state, GestureState::Holding { .. })
    }

    /// Time the current press started, if any
    pub fn press_started_at(&self) -> Option<u32> {
        match self.state {
            GestureState::Holding { since } => Some(since),
            GestureState::Idle => None,
        }
    }

    /// Hold duration of the last release, if not yet taken
    pub fn pending_release(&self) -> Option<u32> {
        self.pending_release
    }

    /// Consume the pending release
    pub fn take_release(&mut self) -> Option<u32> {
        self.pending_release.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_press_then_release_reports_duration() {
        let mut tracker = GestureTracker::new();

        assert_eq!(tracker.update(TouchState::Pressed, 1000), Some(GestureEvent::Pressed));
        assert_eq!(tracker.press_started_at(), Some(1000));

        // Holding is idempotent
        assert_eq!(tracker.update(TouchState::Pressed, 1300), None);
        assert_eq!(tracker.press_started_at(), Some(1000));

        assert_eq!(
            tracker.update(TouchState::Released, 1600),
            Some(GestureEvent::Released { held_ms: 600 })
        );
        assert_eq!(tracker.press_started_at(), None);
        assert_eq!(tracker.pending_release(), Some(600));
    }

    #[test]
    fn test_release_is_taken_once() {
        let mut tracker = GestureTracker::new();
        tracker.update(TouchState::Pressed, 0);
        tracker.update(TouchState::Released, 100);

        assert_eq!(tracker.take_release(), Some(100));
        assert_eq!(tracker.take_release(), None);

        // Further released samples do not resurrect it
        tracker.update(TouchState::Released, 200);
        assert_eq!(tracker.take_release(), None);
    }

    #[test]
    fn test_idle_release_does_nothing() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.update(TouchState::Released, 50), None);
        assert_eq!(tracker.state(), GestureState::Idle);
        assert_eq!(tracker.pending_release(), None);
    }

    #[test]
    fn test_hold_across_clock_wrap() {
        let mut tracker = GestureTracker::new();
        tracker.update(TouchState::Pressed, u32::MAX - 99);
        tracker.update(TouchState::Released, 500);
        assert_eq!(tracker.take_release(), Some(600));
    }

    fn touch_state() -> impl Strategy<Value = TouchState> {
        prop_oneof![Just(TouchState::Pressed), Just(TouchState::Released)]
    }

    proptest! {
        #[test]
        fn prop_press_start_tracks_latest_run(
            samples in proptest::collection::vec((touch_state(), 0u32..50), 1..200)
        ) {
            let mut tracker = GestureTracker::new();
            let mut now = 0u32;
            let mut run_start: Option<u32> = None;

            for (touch, step) in samples {
                now += step;
                tracker.update(touch, now);

                run_start = match (touch, run_start) {
                    (TouchState::Pressed, None) => Some(now),
                    (TouchState::Pressed, start) => start,
                    (TouchState::Released, _) => None,
                };

                prop_assert_eq!(tracker.press_started_at(), run_start);
                prop_assert_eq!(tracker.is_holding(), touch.is_pressed());
            }
        }

        #[test]
        fn prop_one_release_per_pressed_run(
            samples in proptest::collection::vec((touch_state(), 0u32..50), 1..200)
        ) {
            let mut tracker = GestureTracker::new();
            let mut now = 0u32;
            let mut run_start: Option<u32> = None;

            for (touch, step) in samples {
                now += step;
                tracker.update(touch, now);
                let taken = tracker.take_release();

                let expected = match (touch, run_start) {
                    (TouchState::Released, Some(start)) => Some(now - start),
                    _ => None,
                };
                prop_assert_eq!(taken, expected);

                run_start = match touch {
                    TouchState::Pressed => run_start.or(Some(now)),
                    TouchState::Released => None,
                };
            }
        }
    }
}
