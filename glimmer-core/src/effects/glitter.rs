//! Idle glitter
//!
//! While the wand is held (and for a short window after), each tick may
//! flash one random pixel for a single frame. The pixel is lit, the frame
//! is rendered and the pixel is cleared again, so lit pixels never build
//! up across ticks.

use crate::color::{Hsv, Rgb};
use crate::config::GlitterConfig;
use crate::pixels::PixelBuffer;
use crate::traits::time::is_before;
use crate::traits::{PixelOutput, RandomSource};

/// Eligibility window for the idle glitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleWindow {
    expires_at: Option<u32>,
}

impl IdleWindow {
    /// Create an expired window
    pub const fn new() -> Self {
        Self { expires_at: None }
    }

    /// Push the expiry to `now + window_ms`
    pub fn arm(&mut self, now: u32, window_ms: u32) {
        self.expires_at = Some(now.wrapping_add(window_ms));
    }

    /// Check if glitter may fire at `now`
    pub fn is_active(&self, now: u32) -> bool {
        match self.expires_at {
            Some(expires_at) => is_before(now, expires_at),
            None => false,
        }
    }

    /// Expiry time, if ever armed
    pub fn expires_at(&self) -> Option<u32> {
        self.expires_at
    }
}

/// Probabilistic single-frame sparkle
#[derive(Debug, Clone)]
pub struct IdleGlitter {
    config: GlitterConfig,
    window: IdleWindow,
}

impl IdleGlitter {
    /// Create an idle glitter with an expired window
    pub fn new(config: GlitterConfig) -> Self {
        Self {
            config,
            window: IdleWindow::new(),
        }
    }

    /// Re-arm the window; called on every tick the wand is held
    pub fn rearm(&mut self, now: u32) {
        self.window.arm(now, self.config.window_ms);
    }

    /// Current window
    pub fn window(&self) -> IdleWindow {
        self.window
    }

    /// Run one tick
    ///
    /// Returns true if a pixel was flashed (and one frame rendered).
    pub fn tick<const N: usize, R, O>(
        &mut self,
        now: u32,
        pixels: &mut PixelBuffer<N>,
        hue: u8,
        rng: &mut R,
        output: &mut O,
    ) -> bool
    where
        R: RandomSource,
        O: PixelOutput,
    {
        if N == 0 || !self.window.is_active(now) {
            return false;
        }

        if !rng.chance(self.config.chance) {
            return false;
        }

        let index = rng.random_below(N as u16) as usize;
        let offset = rng.random_below(self.config.value_spread as u16) as u8;
        let value = self.config.base_value.saturating_add(offset);

        pixels.set(index, Hsv::new(hue, 255, value).into());
        output.render(pixels.as_slice());
        pixels.set(index, Rgb::BLACK);

        true
    }
}
