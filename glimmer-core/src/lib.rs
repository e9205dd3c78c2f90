//! Board-agnostic core logic for the Glimmer wand firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (touch, strip, clock, randomness)
//! - Touch sampling and the press/hold/release tracker
//! - Free-running color phase
//! - Idle glitter and blast effects
//! - Frame scheduler (the main loop body)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod effects;
pub mod gesture;
pub mod phase;
pub mod pixels;
pub mod scheduler;
pub mod traits;

#[cfg(test)]
mod mock;

pub use color::{Hsv, Rgb};
pub use config::WandConfig;
pub use pixels::PixelBuffer;
pub use scheduler::{Board, FrameScheduler, TickReport};
