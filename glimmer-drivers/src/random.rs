//! Fast 16-bit pseudo-random generator
//!
//! A linear congruential generator with the constants commonly used by
//! LED animation libraries. Statistically weak but cheap, which is all the
//! glitter effects need.

use glimmer_core::traits::RandomSource;

/// Multiplier of the generator
const MULTIPLIER: u16 = 2053;

/// Increment of the generator
const INCREMENT: u16 = 13849;

/// Seed used by [`Lcg16::default`]
pub const DEFAULT_SEED: u16 = 1337;

/// 16-bit linear congruential generator
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lcg16 {
    seed: u16,
}

impl Lcg16 {
    /// Create a generator with the given seed
    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Current seed
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Stir in entropy (e.g. a floating ADC reading or a timer value)
    pub fn add_entropy(&mut self, entropy: u16) {
        self.seed = self.seed.wrapping_add(entropy);
    }

    /// Next raw 16-bit value
    pub fn random16(&mut self) -> u16 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed
    }
}

impl Default for Lcg16 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for Lcg16 {
    fn random_u8(&mut self) -> u8 {
        // The low byte alone has a short period; fold in the high byte
        let [hi, lo] = self.random16().to_be_bytes();
        hi.wrapping_add(lo)
    }

    fn random_below(&mut self, limit: u16) -> u16 {
        if limit <= 256 {
            (self.random_u8() as u16 * limit) >> 8
        } else {
            ((self.random16() as u32 * limit as u32) >> 16) as u16
        }
    }
}
