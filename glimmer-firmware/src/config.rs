//! Wand configuration
//!
//! `wand.toml` is parsed and validated by the build script and compiled in
//! as [`WAND_CONFIG`]; the strip length [`NUM_PIXELS`] comes from the same
//! file.

use defmt::*;

use glimmer_core::config::{
    BlastConfig, BlastMode, GestureConfig, GlitterConfig, HueConfig, StripConfig, TouchConfig,
    TouchPolarity, WandConfig,
};

include!(concat!(env!("OUT_DIR"), "/wand_config.rs"));

/// Configuration to run with
///
/// Falls back to the defaults (on the compiled-in strip length) if the
/// embedded configuration does not validate.
pub fn load() -> WandConfig {
    match WAND_CONFIG.validate() {
        Ok(()) => WAND_CONFIG,
        Err(e) => {
            error!("Embedded config rejected: {}", e.message());
            warn!("Using default configuration");
            WandConfig {
                strip: StripConfig {
                    pixel_count: NUM_PIXELS as u8,
                    ..StripConfig::default()
                },
                ..WandConfig::default()
            }
        }
    }
}
