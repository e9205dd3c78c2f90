//! Configuration types
//!
//! Every tunable of the wand. The defaults give the stock wand behavior;
//! the firmware overrides them from `wand.toml` at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest strip the core is validated for
pub const MAX_PIXELS: usize = 64;

/// Pixel count of the wand strip
pub const DEFAULT_PIXEL_COUNT: u8 = 10;

/// How a raw touch reading maps to "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TouchPolarity {
    /// Reading drops when touched (capacitive touch peripherals)
    #[default]
    BelowThreshold,
    /// Reading rises when touched (RC charge-time sensing)
    AboveThreshold,
}

/// How a triggered blast shares the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlastMode {
    /// Play to completion inside one tick; input is not sampled meanwhile
    #[default]
    Blocking,
    /// One step per tick once its pause has elapsed; input keeps running
    Stepped,
}

/// Touch sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TouchConfig {
    /// Raw reading threshold
    pub threshold: u16,
    /// Which side of the threshold counts as pressed
    pub polarity: TouchPolarity,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            polarity: TouchPolarity::BelowThreshold,
        }
    }
}

/// Gesture configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// A release after a hold strictly longer than this fires a blast (ms)
    pub blast_hold_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { blast_hold_ms: 500 }
    }
}

/// Color phase configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HueConfig {
    /// Minimum time between hue increments (ms)
    pub cadence_ms: u32,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self { cadence_ms: 15 }
    }
}

/// Idle glitter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlitterConfig {
    /// How long glitter stays eligible after the last held tick (ms)
    pub window_ms: u32,
    /// A tick fires when a random byte is below this
    pub chance: u8,
    /// Minimum value of a flashed pixel
    pub base_value: u8,
    /// Random value added on top of `base_value` (exclusive upper bound)
    pub value_spread: u8,
}

impl Default for GlitterConfig {
    fn default() -> Self {
        Self {
            window_ms: 200,
            chance: 160,
            base_value: 80,
            value_spread: 160,
        }
    }
}

/// Blast configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlastConfig {
    /// Pause after each charge step (ms); flash and glitter steps use a third
    pub step_ms: u32,
    /// Fade applied before every charge and flash step
    pub fade_by: u8,
    /// A glitter step fires when a random byte is below this
    pub chance: u8,
    /// Value of the glitter flashes around the tip
    pub glitter_value: u8,
    /// Playback mode
    pub mode: BlastMode,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            step_ms: 40,
            fade_by: 150,
            chance: 160,
            glitter_value: 80,
            mode: BlastMode::Blocking,
        }
    }
}

/// LED strip configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StripConfig {
    /// Number of pixels on the strip
    pub pixel_count: u8,
    /// Nominal brightness applied at output
    pub brightness: u8,
    /// Supply current budget for the strip (mA, 0 = unlimited)
    pub max_milliamps: u32,
    /// Delay before the first frame, limits the inrush at power-on (ms)
    pub startup_delay_ms: u32,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            pixel_count: DEFAULT_PIXEL_COUNT,
            brightness: 255,
            max_milliamps: 200,
            startup_delay_ms: 300,
        }
    }
}

/// Complete wand configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WandConfig {
    pub touch: TouchConfig,
    pub gesture: GestureConfig,
    pub hue: HueConfig,
    pub glitter: GlitterConfig,
    pub blast: BlastConfig,
    pub strip: StripConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pixel count outside 2..=MAX_PIXELS
    InvalidPixelCount(u8),
    /// Hue cadence of zero would advance the hue every tick
    ZeroHueCadence,
    /// No raw reading can ever classify as pressed
    UnreachableTouchThreshold,
    /// Strip would never light
    ZeroBrightness,
    /// Blast steps with no pause between them
    ZeroBlastStep,
}

impl ConfigError {
    /// Short human-readable description
    pub const fn message(&self) -> &'static str {
        match self {
            ConfigError::InvalidPixelCount(_) => "strip.pixel_count must be between 2 and 64",
            ConfigError::ZeroHueCadence => "hue.cadence_ms must be greater than 0",
            ConfigError::UnreachableTouchThreshold => {
                "touch.threshold can never be crossed with this polarity"
            }
            ConfigError::ZeroBrightness => "strip.brightness must be greater than 0",
            ConfigError::ZeroBlastStep => "blast.step_ms must be greater than 0",
        }
    }
}

impl WandConfig {
    /// Check the configuration for values the wand cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pixels = self.strip.pixel_count;
        if pixels < 2 || pixels as usize > MAX_PIXELS {
            return Err(ConfigError::InvalidPixelCount(pixels));
        }

        if self.hue.cadence_ms == 0 {
            return Err(ConfigError::ZeroHueCadence);
        }

        let unreachable = match self.touch.polarity {
            TouchPolarity::BelowThreshold => self.touch.threshold == 0,
            TouchPolarity::AboveThreshold => self.touch.threshold == u16::MAX,
        };
        if unreachable {
            return Err(ConfigError::UnreachableTouchThreshold);
        }

        if self.strip.brightness == 0 {
            return Err(ConfigError::ZeroBrightness);
        }

        if self.blast.step_ms == 0 {
            return Err(ConfigError::ZeroBlastStep);
        }

        Ok(())
    }
}
