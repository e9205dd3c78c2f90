//! Color types and 8-bit color math
//!
//! All math is integer-only and matches the conventions of the common
//! addressable-LED libraries: `scale8` treats `scale` as a fraction of 256,
//! hue is a full byte (0-255 covers the whole wheel).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale `i` by `scale / 256`
///
/// A scale of 255 leaves the value unchanged, 0 turns it off.
#[inline]
pub const fn scale8(i: u8, scale: u8) -> u8 {
    ((i as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale `i` by `scale / 256`, never dimming a lit value to zero
///
/// Used where a faint-but-on pixel must stay on after scaling.
#[inline]
pub const fn scale8_video(i: u8, scale: u8) -> u8 {
    let j = ((i as u16 * scale as u16) >> 8) as u8;
    if i != 0 && scale != 0 {
        j + 1
    } else {
        j
    }
}

/// RGB pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels off
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// All channels full
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `scale / 256`
    pub const fn scaled(self, scale: u8) -> Self {
        Self {
            r: scale8(self.r, scale),
            g: scale8(self.g, scale),
            b: scale8(self.b, scale),
        }
    }

    /// Dim toward black by `amount / 256`
    ///
    /// Repeated application decays exponentially rather than linearly.
    pub const fn faded(self, amount: u8) -> Self {
        self.scaled(255 - amount)
    }

    /// Check if every channel is off
    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// HSV color with byte-sized components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    /// Position on the color wheel (wraps at 256)
    pub hue: u8,
    /// Saturation (0 = white, 255 = pure color)
    pub sat: u8,
    /// Value / brightness
    pub val: u8,
}

impl Hsv {
    /// Create a new HSV color
    pub const fn new(hue: u8, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }
}

impl From<Hsv> for Rgb {
    /// "Rainbow" conversion
    ///
    /// The wheel is split into eight 32-step sections with a widened yellow
    /// band, which looks more even on LEDs than a plain spectrum. Value goes
    /// through a video dimming curve.
    fn from(hsv: Hsv) -> Self {
        let hue = hsv.hue;
        let offset8 = (hue & 0x1F) << 3;
        let third = scale8(offset8, 85);
        let two_thirds = scale8(offset8, 170);

        let (mut r, mut g, mut b) = match hue >> 5 {
            // Red -> Orange
            0 => (255 - third, third, 0),
            // Orange -> Yellow
            1 => (171, 85 + third, 0),
            // Yellow -> Green
            2 => (171 - two_thirds, 170 + third, 0),
            // Green -> Aqua
            3 => (0, 255 - third, third),
            // Aqua -> Blue
            4 => (0, 171 - two_thirds, 85 + two_thirds),
            // Blue -> Purple
            5 => (third, 0, 255 - third),
            // Purple -> Pink
            6 => (85 + third, 0, 171 - third),
            // Pink -> Red
            _ => (170 + third, 0, 85 - third),
        };

        if hsv.sat != 255 {
            if hsv.sat == 0 {
                r = 255;
                g = 255;
                b = 255;
            } else {
                let desat = scale8_video(255 - hsv.sat, 255 - hsv.sat);
                let satscale = 255 - desat;
                let desaturate = |c: u8| {
                    let c = if c != 0 { scale8(c, satscale) + 1 } else { 0 };
                    c.saturating_add(desat)
                };
                r = desaturate(r);
                g = desaturate(g);
                b = desaturate(b);
            }
        }

        if hsv.val != 255 {
            let val = scale8_video(hsv.val, hsv.val);
            if val == 0 {
                return Rgb::BLACK;
            }
            r = scale8(r, val);
            g = scale8(g, val);
            b = scale8(b, val);
        }

        Rgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale8_bounds() {
        assert_eq!(scale8(255, 255), 255);
        assert_eq!(scale8(255, 0), 0);
        assert_eq!(scale8(0, 255), 0);
        assert_eq!(scale8(200, 127), 100);
    }

    #[test]
    fn test_scale8_video_keeps_lit_pixels_on() {
        assert_eq!(scale8_video(1, 1), 1);
        assert_eq!(scale8_video(0, 200), 0);
        assert_eq!(scale8_video(200, 0), 0);
        assert_eq!(scale8_video(255, 255), 255);
    }

    #[test]
    fn test_fade_decays_exponentially() {
        let mut c = Rgb::WHITE;
        c = c.faded(150);
        assert_eq!(c, Rgb::new(105, 105, 105));
        c = c.faded(150);
        assert_eq!(c, Rgb::new(43, 43, 43));
        // Never below zero, converges to black
        for _ in 0..10 {
            c = c.faded(150);
        }
        assert!(c.is_black());
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(Rgb::from(Hsv::new(0, 255, 255)), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from(Hsv::new(96, 255, 255)), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from(Hsv::new(160, 255, 255)), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_zero_value_is_black() {
        for hue in [0u8, 37, 128, 250] {
            assert!(Rgb::from(Hsv::new(hue, 255, 0)).is_black());
        }
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        let c = Rgb::from(Hsv::new(42, 0, 255));
        assert_eq!(c, Rgb::WHITE);
    }

    #[test]
    fn test_lower_value_is_dimmer() {
        let bright = Rgb::from(Hsv::new(10, 255, 250));
        let dim = Rgb::from(Hsv::new(10, 255, 80));
        assert!(dim.r < bright.r);
        assert!(!dim.is_black());
    }

    #[test]
    fn test_every_hue_lights_something() {
        for hue in 0..=255u8 {
            assert!(!Rgb::from(Hsv::new(hue, 255, 255)).is_black(), "hue {}", hue);
        }
    }
}
