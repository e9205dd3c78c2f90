//! Frame scheduler
//!
//! Ties touch sampling, gesture tracking, the hue and both effects into
//! one loop iteration.

pub mod frame;

pub use frame::{BlastOutcome, Board, FrameScheduler, LoopStats, TickReport};
