//! Board bindings
//!
//! Concrete types behind the core traits on an RP2040 board:
//!
//! | Function    | Pin    | Peripheral |
//! |-------------|--------|------------|
//! | WS2812 data | GPIO16 | PIO0 SM0   |
//! | Touch send  | GPIO14 | GPIO       |
//! | Touch sense | GPIO15 | GPIO       |

use embassy_futures::block_on;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::{Delay, Instant};
use smart_leds::RGB8;

use glimmer_core::color::Rgb;
use glimmer_core::traits::{Clock, PixelOutput};
use glimmer_core::FrameScheduler;
use glimmer_drivers::power::PowerLimiter;
use glimmer_drivers::random::Lcg16;
use glimmer_drivers::touch::ChargeTimeSensor;

use crate::config::NUM_PIXELS;

/// Touch electrode
pub type Touch = ChargeTimeSensor<Output<'static>, Input<'static>>;

/// Current-limited LED strip
pub type Strip = PowerLimiter<Ws2812Output<'static, PIO0, 0, NUM_PIXELS>, NUM_PIXELS>;

/// The wand main loop on this board
pub type Wand = FrameScheduler<Touch, EmbassyClock, Lcg16, Strip, Delay, NUM_PIXELS>;

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days; the core compares timestamps with wrapping math
        Instant::now().as_millis() as u32
    }
}

/// WS2812 strip driven by a PIO state machine
///
/// Frames are pushed over DMA; `render` waits for the transfer so the
/// caller sees the same blocking behavior as a bit-banged strip.
pub struct Ws2812Output<'d, P: Instance, const S: usize, const N: usize> {
    strip: PioWs2812<'d, P, S, N>,
    frame: [RGB8; N],
    brightness: u8,
}

impl<'d, P: Instance, const S: usize, const N: usize> Ws2812Output<'d, P, S, N> {
    /// Wrap an initialized PIO WS2812 driver
    pub fn new(strip: PioWs2812<'d, P, S, N>) -> Self {
        Self {
            strip,
            frame: [RGB8::default(); N],
            brightness: 255,
        }
    }
}

impl<P: Instance, const S: usize, const N: usize> PixelOutput for Ws2812Output<'_, P, S, N> {
    fn render(&mut self, pixels: &[Rgb]) {
        self.frame = [RGB8::default(); N];
        for (out, pixel) in self.frame.iter_mut().zip(pixels) {
            let pixel = pixel.scaled(self.brightness);
            *out = RGB8::new(pixel.r, pixel.g, pixel.b);
        }

        block_on(self.strip.write(&self.frame));
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}
