//! Touch sampler
//!
//! Classifies a raw reading against a fixed threshold. No debouncing and
//! no memory: every call is an independent decision.

use crate::config::{TouchConfig, TouchPolarity};
use crate::traits::TouchSensor;

/// Instantaneous touch classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchState {
    Pressed,
    Released,
}

impl TouchState {
    /// Check if the electrode is touched
    pub fn is_pressed(&self) -> bool {
        matches!(self, TouchState::Pressed)
    }
}

/// Threshold classifier for raw touch readings
#[derive(Debug, Clone, Copy)]
pub struct TouchSampler {
    config: TouchConfig,
}

impl TouchSampler {
    /// Create a new sampler
    pub fn new(config: TouchConfig) -> Self {
        Self { config }
    }

    /// Classify a raw reading
    pub fn classify(&self, raw: u16) -> TouchState {
        let pressed = match self.config.polarity {
            TouchPolarity::BelowThreshold => raw < self.config.threshold,
            TouchPolarity::AboveThreshold => raw > self.config.threshold,
        };

        if pressed {
            TouchState::Pressed
        } else {
            TouchState::Released
        }
    }

    /// Read the sensor and classify the result
    ///
    /// A failed read counts as released: a broken electrode looks exactly
    /// like one nobody is touching.
    pub fn sample<T: TouchSensor>(&self, sensor: &mut T) -> TouchState {
        match sensor.read_raw() {
            Ok(raw) => self.classify(raw),
            Err(_) => TouchState::Released,
        }
    }
}
