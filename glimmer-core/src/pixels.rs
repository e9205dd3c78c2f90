//! Pixel buffer
//!
//! A fixed-size frame of RGB values. The scheduler owns the only buffer and
//! lends it to one effect at a time.

use core::ops::Range;

use crate::color::Rgb;

/// Frame of `N` pixels, index 0 at the handle end of the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelBuffer<N> {
    /// Create an all-black buffer
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb::BLACK; N],
        }
    }

    /// Number of pixels
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the buffer has no pixels
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Pixels as a slice, ready to render
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Get a pixel
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set a pixel
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Set the pixels in `range` to `color`, clipped to the strip
    pub fn fill_range(&mut self, range: Range<usize>, color: Rgb) {
        let end = range.end.min(N);
        if range.start < end {
            self.pixels[range.start..end].fill(color);
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    /// Dim every pixel toward black by `amount / 256`
    pub fn fade_to_black_by(&mut self, amount: u8) {
        for pixel in self.pixels.iter_mut() {
            *pixel = pixel.faded(amount);
        }
    }

    /// Check if every pixel is off
    pub fn is_dark(&self) -> bool {
        self.pixels.iter().all(Rgb::is_black)
    }

    /// Number of pixels that are lit
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_black()).count()
    }
}
