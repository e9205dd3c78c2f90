//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in glimmer-core for the wand's components:
//!
//! - Capacitive touch by RC charge-time measurement
//! - Brightness and current limiting in front of any LED strip output
//! - Fast 16-bit pseudo-random generator for the glitter effects

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod power;
pub mod random;
pub mod touch;
