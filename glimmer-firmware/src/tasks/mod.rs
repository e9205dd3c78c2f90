//! Embassy async tasks

pub mod wand;

pub use wand::wand_task;
