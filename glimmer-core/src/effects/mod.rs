//! LED effects
//!
//! Both effects draw into the scheduler's pixel buffer and render through
//! the strip output. Only one of them touches the buffer in any tick.

pub mod blast;
pub mod glitter;

pub use blast::{Blast, BlastPhase, BlastSummary};
pub use glitter::{IdleGlitter, IdleWindow};
