//! LED strip output trait

use crate::color::Rgb;

/// Addressable LED strip
///
/// Implementations push a frame to the physical strip. They may apply
/// their own brightness and current limiting before doing so.
pub trait PixelOutput {
    /// Push `pixels` to the strip
    fn render(&mut self, pixels: &[Rgb]);

    /// Set the global brightness applied at output (255 = unscaled)
    fn set_brightness(&mut self, brightness: u8);
}

impl<T: PixelOutput + ?Sized> PixelOutput for &mut T {
    fn render(&mut self, pixels: &[Rgb]) {
        T::render(self, pixels)
    }

    fn set_brightness(&mut self, brightness: u8) {
        T::set_brightness(self, brightness)
    }
}
