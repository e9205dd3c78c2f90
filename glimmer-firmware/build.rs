//! Build script for glimmer-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates wand.toml at compile time and bakes it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use glimmer_core::config::WandConfig;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate wand.toml
fn validate_config() -> WandConfig {
    println!("cargo:rerun-if-changed=wand.toml");

    let config_path = Path::new("wand.toml");

    if !config_path.exists() {
        fail(
            "wand.toml not found!",
            &[
                "The firmware requires a wand.toml configuration file.".into(),
                "Please create one in the glimmer-firmware directory.".into(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read wand.toml", &[format!("Error: {}", e)]),
    };

    // Wrong types are rejected here; missing keys keep their defaults
    let config: WandConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid wand.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    if let Err(e) = config.validate() {
        fail("Invalid wand configuration", &[format!("• {}", e.message())]);
    }

    println!("cargo:warning=wand.toml validated successfully");
    config
}

/// Write the validated configuration as Rust constants
fn generate_config(config: &WandConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let touch = &config.touch;
    let glitter = &config.glitter;
    let blast = &config.blast;
    let strip = &config.strip;

    let source = format!(
        "/// Configuration baked in from wand.toml\n\
         pub const WAND_CONFIG: WandConfig = WandConfig {{\n    \
             touch: TouchConfig {{ threshold: {}, polarity: TouchPolarity::{:?} }},\n    \
             gesture: GestureConfig {{ blast_hold_ms: {} }},\n    \
             hue: HueConfig {{ cadence_ms: {} }},\n    \
             glitter: GlitterConfig {{ window_ms: {}, chance: {}, base_value: {}, value_spread: {} }},\n    \
             blast: BlastConfig {{ step_ms: {}, fade_by: {}, chance: {}, glitter_value: {}, mode: BlastMode::{:?} }},\n    \
             strip: StripConfig {{ pixel_count: {}, brightness: {}, max_milliamps: {}, startup_delay_ms: {} }},\n\
         }};\n\
         \n\
         /// Strip length\n\
         pub const NUM_PIXELS: usize = {};\n",
        touch.threshold,
        touch.polarity,
        config.gesture.blast_hold_ms,
        config.hue.cadence_ms,
        glitter.window_ms,
        glitter.chance,
        glitter.base_value,
        glitter.value_spread,
        blast.step_ms,
        blast.fade_by,
        blast.chance,
        blast.glitter_value,
        blast.mode,
        strip.pixel_count,
        strip.brightness,
        strip.max_milliamps,
        strip.startup_delay_ms,
        strip.pixel_count,
    );

    fs::write(out_dir.join("wand_config.rs"), source).unwrap();
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
