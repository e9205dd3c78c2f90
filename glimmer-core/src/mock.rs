//! Simulated hardware for host tests
//!
//! The clock, delay and touch sensor share one simulated time base so a
//! blocking blast moves time forward exactly like on the device.

use std::cell::Cell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::color::Rgb;
use crate::traits::{Clock, PixelOutput, RandomSource, TouchError, TouchSensor};

/// Shared simulated time in nanoseconds
#[derive(Debug, Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u32 {
        (self.0.get() / 1_000_000) as u32
    }

    pub fn advance_ms(&self, ms: u32) {
        self.0.set(self.0.get() + ms as u64 * 1_000_000);
    }

    pub fn advance_ns(&self, ns: u32) {
        self.0.set(self.0.get() + ns as u64);
    }
}

/// Clock reading the shared time
pub struct SimClock(pub SimTime);

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.0.now_ms()
    }
}

/// Blocking delay that advances the shared time
pub struct SimDelay {
    pub time: SimTime,
    pub pauses_ms: Vec<u32>,
}

impl SimDelay {
    pub fn new(time: SimTime) -> Self {
        Self {
            time,
            pauses_ms: Vec::new(),
        }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
        self.time.advance_ms(ms);
    }
}

/// Touch electrode pressed during scripted intervals
pub struct SimTouch {
    pub time: SimTime,
    /// Half-open `[start, end)` press intervals in ms
    pub presses: Vec<(u32, u32)>,
    pub reads: u32,
}

impl SimTouch {
    pub const PRESSED_RAW: u16 = 12;
    pub const RELEASED_RAW: u16 = 400;

    pub fn new(time: SimTime, presses: Vec<(u32, u32)>) -> Self {
        Self {
            time,
            presses,
            reads: 0,
        }
    }
}

impl TouchSensor for SimTouch {
    fn read_raw(&mut self) -> Result<u16, TouchError> {
        self.reads += 1;
        let now = self.time.now_ms();
        let pressed = self.presses.iter().any(|&(start, end)| now >= start && now < end);
        Ok(if pressed {
            Self::PRESSED_RAW
        } else {
            Self::RELEASED_RAW
        })
    }
}

/// Output that records every rendered frame
#[derive(Default)]
pub struct RecordingOutput {
    pub frames: Vec<Vec<Rgb>>,
    pub brightness: Option<u8>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PixelOutput for RecordingOutput {
    fn render(&mut self, pixels: &[Rgb]) {
        self.frames.push(pixels.to_vec());
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
    }
}

/// Random source returning fixed values
pub struct FixedRng {
    pub byte: u8,
    pub below: u16,
}

impl FixedRng {
    /// Every roll succeeds, every pick lands on `below`
    pub fn always(below: u16) -> Self {
        Self { byte: 0, below }
    }

    /// Every roll fails
    pub fn never() -> Self {
        Self { byte: 255, below: 0 }
    }
}

impl RandomSource for FixedRng {
    fn random_u8(&mut self) -> u8 {
        self.byte
    }

    fn random_below(&mut self, limit: u16) -> u16 {
        if limit == 0 {
            0
        } else {
            self.below.min(limit - 1)
        }
    }
}

/// Small xorshift generator for tests that need variety
pub struct XorShiftRng(pub u32);

impl XorShiftRng {
    fn next(&mut self) -> u32 {
        let mut x = self.0.max(1);
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

impl RandomSource for XorShiftRng {
    fn random_u8(&mut self) -> u8 {
        (self.next() >> 24) as u8
    }

    fn random_below(&mut self, limit: u16) -> u16 {
        (((self.next() >> 16) * limit as u32) >> 16) as u16
    }
}
