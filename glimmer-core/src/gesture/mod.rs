//! Touch gesture detection
//!
//! Raw touch readings become a press/hold/release gesture:
//! the sampler classifies each reading, the tracker measures how long
//! the touch was held and reports the release.

pub mod sampler;
pub mod tracker;

pub use sampler::{TouchSampler, TouchState};
pub use tracker::{GestureEvent, GestureState, GestureTracker};
