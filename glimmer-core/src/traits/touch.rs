//! Touch sensor trait

/// Errors that can occur while reading the touch electrode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Measurement did not settle in time (electrode disconnected or shorted)
    Timeout,
    /// GPIO access failed
    Pin,
}

/// Raw capacitive touch input
///
/// Implementations return an uncalibrated reading; which side of the
/// threshold means "touched" is a configuration matter.
pub trait TouchSensor {
    /// Take one reading
    fn read_raw(&mut self) -> Result<u16, TouchError>;
}

impl<T: TouchSensor + ?Sized> TouchSensor for &mut T {
    fn read_raw(&mut self) -> Result<u16, TouchError> {
        T::read_raw(self)
    }
}
