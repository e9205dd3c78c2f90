//! Hardware abstraction traits
//!
//! These traits define the interface between the wand logic and the
//! board: the touch electrode, the LED strip, a millisecond clock and a
//! source of randomness. Blocking pauses use `embedded_hal::delay::DelayNs`.

pub mod output;
pub mod random;
pub mod time;
pub mod touch;

pub use output::PixelOutput;
pub use random::RandomSource;
pub use time::Clock;
pub use touch::{TouchError, TouchSensor};
