//! Random source trait

/// Pseudo-random numbers for the glitter effects
///
/// No reproducibility or seeding contract is required.
pub trait RandomSource {
    /// Uniform byte in `0..=255`
    fn random_u8(&mut self) -> u8;

    /// Uniform value in `0..limit` (0 when `limit` is 0)
    fn random_below(&mut self, limit: u16) -> u16;

    /// Roll against `threshold / 256`
    fn chance(&mut self, threshold: u8) -> bool {
        self.random_u8() < threshold
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn random_u8(&mut self) -> u8 {
        T::random_u8(self)
    }

    fn random_below(&mut self, limit: u16) -> u16 {
        T::random_below(self, limit)
    }
}
