//! Glimmer - Handheld Light-Up Wand Firmware
//!
//! Main firmware binary for RP2040-based wands. Holding the wand makes the
//! strip glitter in a slowly cycling hue; holding it past the blast
//! threshold and letting go fires a blast toward the tip.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{Delay, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use glimmer_core::color::Rgb;
use glimmer_core::traits::{PixelOutput, TouchSensor};
use glimmer_core::{Board, FrameScheduler};
use glimmer_drivers::power::PowerLimiter;
use glimmer_drivers::random::Lcg16;
use glimmer_drivers::touch::{ChargeTimeConfig, ChargeTimeSensor};

use crate::board::{EmbassyClock, Ws2812Output};
use crate::config::NUM_PIXELS;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glimmer wand started");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Config: {} pixels, brightness {}, {} mA budget, blast {} after {} ms hold",
        NUM_PIXELS,
        config.strip.brightness,
        config.strip.max_milliamps,
        config.blast.mode,
        config.gesture.blast_hold_ms
    );

    // WS2812 strip on PIO0 SM0, data on GPIO16
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);

    let mut strip = Ws2812Output::new(ws2812);
    // Blank whatever the strip latched at power-on
    strip.render(&[Rgb::BLACK; NUM_PIXELS]);
    let strip = PowerLimiter::new(strip, config.strip.max_milliamps);

    info!("LED strip initialized");

    // Touch electrode: send GPIO14 through 1M to the foil on GPIO15
    let mut touch = ChargeTimeSensor::new(
        Output::new(p.PIN_14, Level::Low),
        Input::new(p.PIN_15, Pull::None),
        ChargeTimeConfig::default(),
    );

    info!("Touch sensor initialized");

    // Let the supply settle before the first lit frame
    Timer::after_millis(config.strip.startup_delay_ms as u64).await;

    // Seed from boot timing and the electrode noise
    let mut rng = Lcg16::default();
    rng.add_entropy(Instant::now().as_ticks() as u16);
    if let Ok(raw) = touch.read_raw() {
        rng.add_entropy(raw);
    }

    let board = Board {
        touch,
        clock: EmbassyClock,
        rng,
        output: strip,
        delay: Delay,
    };
    let wand = FrameScheduler::new(config, board);

    spawner.spawn(unwrap!(tasks::wand_task(wand)));

    info!("Wand task spawned, firmware running");

    // The PIO common block stays alive here for the lifetime of the strip
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
