//! Frame scheduler
//!
//! The wand's main loop body. Each call to [`FrameScheduler::tick`] runs,
//! in this order:
//!
//! 1. sample the touch input and update the gesture tracker
//! 2. fire a blast for a release after a long enough hold
//! 3. re-arm the idle window while the wand is held
//! 4. run the idle glitter
//! 5. render the buffer
//! 6. advance the hue on its cadence
//!
//! Ticks run as fast as the board allows; there is no fixed frame rate.

use embedded_hal::delay::DelayNs;

use crate::config::{BlastMode, WandConfig};
use crate::effects::{Blast, BlastSummary, IdleGlitter, IdleWindow};
use crate::gesture::{GestureTracker, TouchSampler, TouchState};
use crate::phase::HuePhase;
use crate::pixels::PixelBuffer;
use crate::traits::time::is_before;
use crate::traits::{Clock, PixelOutput, RandomSource, TouchSensor};

/// Hardware the scheduler drives
pub struct Board<T, C, R, O, D> {
    /// Touch electrode
    pub touch: T,
    /// Millisecond clock
    pub clock: C,
    /// Random source for the glitter effects
    pub rng: R,
    /// LED strip
    pub output: O,
    /// Blocking delay used between blast steps
    pub delay: D,
}

/// What the blast did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlastOutcome {
    /// No blast activity
    Idle,
    /// A blast played to completion inside this tick
    Played { held_ms: u32, summary: BlastSummary },
    /// A stepped blast started
    Started { held_ms: u32 },
    /// A stepped blast is in progress
    InProgress,
    /// A stepped blast finished and cleared the strip
    Finished,
    /// A long hold ended while a stepped blast was still playing
    Dropped { held_ms: u32 },
}

impl BlastOutcome {
    /// Check if the blast held the buffer this tick
    pub fn owns_buffer(&self) -> bool {
        matches!(
            self,
            BlastOutcome::Played { .. }
                | BlastOutcome::Started { .. }
                | BlastOutcome::InProgress
                | BlastOutcome::Finished
                | BlastOutcome::Dropped { .. }
        )
    }
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Touch classification this tick
    pub touch: TouchState,
    /// Hold duration of a release detected this tick (ms)
    pub released_after: Option<u32>,
    /// Blast activity
    pub blast: BlastOutcome,
    /// Idle glitter flashed a pixel
    pub glitter: bool,
    /// Hue stepped at the end of the tick
    pub hue_advanced: bool,
}

/// Running totals since start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopStats {
    pub ticks: u32,
    pub blasts: u32,
    pub glitters: u32,
    pub dropped_blasts: u32,
}

/// Blast being played one step per tick
#[derive(Debug, Clone)]
struct SteppedBlast {
    blast: Blast,
    next_step_at: u32,
}

/// Wand main loop state
///
/// Owns the pixel buffer, the gesture tracker, the hue and the idle window,
/// plus the board it renders to. `N` is the strip length.
pub struct FrameScheduler<T, C, R, O, D, const N: usize> {
    config: WandConfig,
    board: Board<T, C, R, O, D>,
    sampler: TouchSampler,
    tracker: GestureTracker,
    hue: HuePhase,
    glitter: IdleGlitter,
    pixels: PixelBuffer<N>,
    stepped: Option<SteppedBlast>,
    stats: LoopStats,
}

impl<T, C, R, O, D, const N: usize> FrameScheduler<T, C, R, O, D, N>
where
    T: TouchSensor,
    C: Clock,
    R: RandomSource,
    O: PixelOutput,
    D: DelayNs,
{
    /// Create the scheduler and apply the configured strip brightness
    ///
    /// The strip length is `N`; `config.strip.pixel_count` must agree with it.
    pub fn new(config: WandConfig, mut board: Board<T, C, R, O, D>) -> Self {
        debug_assert_eq!(
            config.strip.pixel_count as usize,
            N,
            "strip.pixel_count does not match the pixel buffer"
        );
        board.output.set_brightness(config.strip.brightness);
        let now = board.clock.now_ms();

        Self {
            sampler: TouchSampler::new(config.touch),
            tracker: GestureTracker::new(),
            hue: HuePhase::new(config.hue.cadence_ms, now),
            glitter: IdleGlitter::new(config.glitter),
            pixels: PixelBuffer::new(),
            stepped: None,
            stats: LoopStats::default(),
            config,
            board,
        }
    }

    /// Run one loop iteration
    pub fn tick(&mut self) -> TickReport {
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        let now = self.board.clock.now_ms();
        let touch = self.sampler.sample(&mut self.board.touch);
        self.tracker.update(touch, now);
        let released_after = self.tracker.take_release();

        let blast = match self.config.blast.mode {
            BlastMode::Blocking => self.play_blocking(released_after),
            BlastMode::Stepped => self.advance_stepped(released_after, now),
        };

        // A blocking blast may have taken most of a second
        let now = self.board.clock.now_ms();
        if self.tracker.is_holding() {
            self.glitter.rearm(now);
        }

        let glitter = !blast.owns_buffer()
            && self.glitter.tick(
                now,
                &mut self.pixels,
                self.hue.hue(),
                &mut self.board.rng,
                &mut self.board.output,
            );
        if glitter {
            self.stats.glitters = self.stats.glitters.wrapping_add(1);
        }

        self.board.output.render(self.pixels.as_slice());

        let hue_advanced = self.hue.advance(self.board.clock.now_ms());

        TickReport {
            touch,
            released_after,
            blast,
            glitter,
            hue_advanced,
        }
    }

    fn qualifies(&self, released_after: Option<u32>) -> Option<u32> {
        released_after.filter(|&held_ms| held_ms > self.config.gesture.blast_hold_ms)
    }

    fn play_blocking(&mut self, released_after: Option<u32>) -> BlastOutcome {
        let Some(held_ms) = self.qualifies(released_after) else {
            return BlastOutcome::Idle;
        };

        let summary = Blast::new(self.config.blast).play(
            &mut self.pixels,
            self.hue.hue(),
            &mut self.board.rng,
            &mut self.board.output,
            &mut self.board.delay,
        );
        self.stats.blasts = self.stats.blasts.wrapping_add(1);

        BlastOutcome::Played { held_ms, summary }
    }

    fn start_stepped(&mut self, held_ms: u32, now: u32) -> BlastOutcome {
        let mut blast = Blast::new(self.config.blast);
        let pause = blast.step(
            &mut self.pixels,
            self.hue.hue(),
            &mut self.board.rng,
            &mut self.board.output,
        );
        if let Some(pause_ms) = pause {
            self.stepped = Some(SteppedBlast {
                blast,
                next_step_at: now.wrapping_add(pause_ms),
            });
        }
        self.stats.blasts = self.stats.blasts.wrapping_add(1);

        BlastOutcome::Started { held_ms }
    }

    fn advance_stepped(&mut self, released_after: Option<u32>, now: u32) -> BlastOutcome {
        let qualifying = self.qualifies(released_after);

        let Some(active) = self.stepped.as_mut() else {
            return match qualifying {
                Some(held_ms) => self.start_stepped(held_ms, now),
                None => BlastOutcome::Idle,
            };
        };

        let mut finished = false;
        if !is_before(now, active.next_step_at) {
            match active.blast.step(
                &mut self.pixels,
                self.hue.hue(),
                &mut self.board.rng,
                &mut self.board.output,
            ) {
                Some(pause_ms) => active.next_step_at = now.wrapping_add(pause_ms),
                None => finished = true,
            }
        }

        if finished {
            self.stepped = None;
        }

        match qualifying {
            // The buffer was freed this tick; the new blast takes it over
            Some(held_ms) if finished => self.start_stepped(held_ms, now),
            Some(held_ms) => {
                self.stats.dropped_blasts = self.stats.dropped_blasts.wrapping_add(1);
                BlastOutcome::Dropped { held_ms }
            }
            None if finished => BlastOutcome::Finished,
            None => BlastOutcome::InProgress,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &WandConfig {
        &self.config
    }

    /// Hardware
    pub fn board(&self) -> &Board<T, C, R, O, D> {
        &self.board
    }

    /// Mutable hardware access
    pub fn board_mut(&mut self) -> &mut Board<T, C, R, O, D> {
        &mut self.board
    }

    /// Current pixel buffer
    pub fn pixels(&self) -> &PixelBuffer<N> {
        &self.pixels
    }

    /// Gesture tracker
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Current hue
    pub fn hue(&self) -> u8 {
        self.hue.hue()
    }

    /// Idle glitter window
    pub fn idle_window(&self) -> IdleWindow {
        self.glitter.window()
    }

    /// Check if a stepped blast is playing
    pub fn is_blasting(&self) -> bool {
        self.stepped.is_some()
    }

    /// Running totals
    pub fn stats(&self) -> LoopStats {
        self.stats
    }
}
