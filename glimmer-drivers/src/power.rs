//! Brightness and current limiting
//!
//! WS2812 strips draw most of their current through the LEDs themselves,
//! so a full-white frame on a small USB supply can brown out the board.
//! [`PowerLimiter`] sits in front of any [`PixelOutput`], estimates the
//! draw of each frame and lowers the brightness just enough to stay
//! inside the budget.
//!
//! The estimate uses the nominal per-channel draw of a 5 V WS2812 at full
//! duty, plus a fixed quiescent draw per LED:
//!
//! | Channel | mA at 255 |
//! |---------|-----------|
//! | Red     | 16        |
//! | Green   | 11        |
//! | Blue    | 15        |
//! | Idle    | 1 per LED |

use glimmer_core::color::Rgb;
use glimmer_core::traits::PixelOutput;

/// Red channel draw at full duty (mA)
pub const RED_MA: u32 = 16;

/// Green channel draw at full duty (mA)
pub const GREEN_MA: u32 = 11;

/// Blue channel draw at full duty (mA)
pub const BLUE_MA: u32 = 15;

/// Quiescent draw per LED (mA)
pub const DARK_MA: u32 = 1;

/// Estimated draw of `pixels` at full brightness (mA)
pub fn estimate_milliamps(pixels: &[Rgb]) -> u32 {
    let (mut red, mut green, mut blue) = (0u32, 0u32, 0u32);
    for pixel in pixels {
        red += pixel.r as u32;
        green += pixel.g as u32;
        blue += pixel.b as u32;
    }

    ((red * RED_MA) >> 8)
        + ((green * GREEN_MA) >> 8)
        + ((blue * BLUE_MA) >> 8)
        + pixels.len() as u32 * DARK_MA
}

/// Highest brightness, at most `brightness`, keeping `pixels` within
/// `max_milliamps` (0 = unlimited)
pub fn limit_brightness(pixels: &[Rgb], brightness: u8, max_milliamps: u32) -> u8 {
    if max_milliamps == 0 {
        return brightness;
    }

    let requested = estimate_milliamps(pixels) * brightness as u32 / 256;
    if requested <= max_milliamps {
        return brightness;
    }

    (brightness as u32 * max_milliamps / requested) as u8
}

/// Current-limiting wrapper around a pixel output
///
/// Frames longer than `N` are truncated.
pub struct PowerLimiter<O, const N: usize> {
    inner: O,
    scratch: [Rgb; N],
    brightness: u8,
    max_milliamps: u32,
    applied: u8,
}

impl<O: PixelOutput, const N: usize> PowerLimiter<O, N> {
    /// Wrap `inner` with a budget of `max_milliamps` (0 = unlimited)
    ///
    /// The limiter owns brightness from here on; `inner` is left at full
    /// brightness and receives already-scaled frames.
    pub fn new(mut inner: O, max_milliamps: u32) -> Self {
        inner.set_brightness(255);
        Self {
            inner,
            scratch: [Rgb::BLACK; N],
            brightness: 255,
            max_milliamps,
            applied: 255,
        }
    }

    /// Brightness used for the last frame
    pub fn applied_brightness(&self) -> u8 {
        self.applied
    }

    /// Check if the last frame had to be dimmed below the nominal brightness
    pub fn is_limiting(&self) -> bool {
        self.applied < self.brightness
    }

    /// Current budget (mA)
    pub fn max_milliamps(&self) -> u32 {
        self.max_milliamps
    }

    /// Wrapped output
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Unwrap the output
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: PixelOutput, const N: usize> PixelOutput for PowerLimiter<O, N> {
    fn render(&mut self, pixels: &[Rgb]) {
        let len = pixels.len().min(N);
        let frame = &pixels[..len];

        self.applied = limit_brightness(frame, self.brightness, self.max_milliamps);
        for (out, pixel) in self.scratch.iter_mut().zip(frame) {
            *out = pixel.scaled(self.applied);
        }

        self.inner.render(&self.scratch[..len]);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}
