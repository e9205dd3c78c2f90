//! Capacitive touch by charge-time measurement
//!
//! A send pin drives the electrode through a high-value resistor
//! (around 1 MΩ); the receive pin sits on the electrode itself. A finger
//! adds capacitance, so the receive side takes longer to follow the send
//! side. The reading is the number of polling loops spent waiting for the
//! receive pin to charge and then discharge, summed over several samples.
//!
//! ```text
//!   send ──[ 1MΩ ]──┬── receive
//!                   │
//!               electrode (foil)
//! ```
//!
//! The reading rises on touch, so the wand must be configured with
//! `TouchPolarity::AboveThreshold` when using this sensor.

use embedded_hal::digital::{InputPin, OutputPin};

use glimmer_core::traits::{TouchError, TouchSensor};

/// Charge-time sensor configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeTimeConfig {
    /// Charge/discharge cycles summed per reading
    pub samples: u8,
    /// Loop budget per reading before giving up
    pub timeout_loops: u32,
}

impl Default for ChargeTimeConfig {
    fn default() -> Self {
        Self {
            samples: 4,
            timeout_loops: 20_000,
        }
    }
}

/// RC charge-time touch sensor
pub struct ChargeTimeSensor<S, R> {
    send: S,
    receive: R,
    config: ChargeTimeConfig,
}

impl<S: OutputPin, R: InputPin> ChargeTimeSensor<S, R> {
    /// Create a new sensor
    pub fn new(send: S, receive: R, config: ChargeTimeConfig) -> Self {
        Self {
            send,
            receive,
            config,
        }
    }

    /// Release the pins
    pub fn release(self) -> (S, R) {
        (self.send, self.receive)
    }

    /// One charge/discharge cycle, adding the loops spent to `loops`
    fn cycle(&mut self, loops: &mut u32) -> Result<(), TouchError> {
        self.send.set_high().map_err(|_| TouchError::Pin)?;
        while self.receive.is_low().map_err(|_| TouchError::Pin)? {
            *loops += 1;
            if *loops >= self.config.timeout_loops {
                // Leave the electrode discharged for the next reading
                let _ = self.send.set_low();
                return Err(TouchError::Timeout);
            }
        }

        self.send.set_low().map_err(|_| TouchError::Pin)?;
        while self.receive.is_high().map_err(|_| TouchError::Pin)? {
            *loops += 1;
            if *loops >= self.config.timeout_loops {
                return Err(TouchError::Timeout);
            }
        }

        Ok(())
    }
}

impl<S: OutputPin, R: InputPin> TouchSensor for ChargeTimeSensor<S, R> {
    fn read_raw(&mut self) -> Result<u16, TouchError> {
        let mut loops = 0u32;
        for _ in 0..self.config.samples.max(1) {
            self.cycle(&mut loops)?;
        }

        Ok(loops.min(u16::MAX as u32) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Send side of a simulated RC network
    struct SendPin(Rc<Cell<bool>>);

    impl ErrorType for SendPin {
        type Error = Infallible;
    }

    impl OutputPin for SendPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    /// Receive side: needs `tau` reads to swing fully across, with hysteresis
    struct ReceivePin {
        send: Rc<Cell<bool>>,
        tau: u32,
        charge: u32,
        high: bool,
    }

    impl ReceivePin {
        fn settle(&mut self) {
            if self.send.get() {
                self.charge = (self.charge + 1).min(self.tau);
            } else {
                self.charge = self.charge.saturating_sub(1);
            }
            if self.charge >= self.tau {
                self.high = true;
            } else if self.charge == 0 {
                self.high = false;
            }
        }
    }

    impl ErrorType for ReceivePin {
        type Error = Infallible;
    }

    impl InputPin for ReceivePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            self.settle();
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.settle();
            Ok(!self.high)
        }
    }

    fn sensor(tau: u32, config: ChargeTimeConfig) -> ChargeTimeSensor<SendPin, ReceivePin> {
        let level = Rc::new(Cell::new(false));
        let receive = ReceivePin {
            send: level.clone(),
            tau,
            charge: 0,
            high: false,
        };
        ChargeTimeSensor::new(SendPin(level), receive, config)
    }

    #[test]
    fn test_reading_counts_both_edges() {
        let mut s = sensor(20, ChargeTimeConfig::default());
        // (tau - 1) loops each way, four samples
        assert_eq!(s.read_raw(), Ok(4 * 2 * 19));
        // Repeatable: the electrode ends every reading discharged
        assert_eq!(s.read_raw(), Ok(4 * 2 * 19));
    }

    #[test]
    fn test_touch_raises_reading() {
        let mut untouched = sensor(10, ChargeTimeConfig::default());
        let mut touched = sensor(60, ChargeTimeConfig::default());
        assert!(touched.read_raw().unwrap() > untouched.read_raw().unwrap());
    }

    #[test]
    fn test_times_out() {
        let config = ChargeTimeConfig {
            samples: 4,
            timeout_loops: 100,
        };
        let mut s = sensor(1000, config);
        assert_eq!(s.read_raw(), Err(TouchError::Timeout));

        // Send pin left low after the timeout
        let (send, _) = s.release();
        assert!(!send.0.get());
    }

    #[derive(Debug)]
    struct Fault;

    impl Error for Fault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = Fault;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Fault> {
            Err(Fault)
        }

        fn is_low(&mut self) -> Result<bool, Fault> {
            Err(Fault)
        }
    }

    #[test]
    fn test_pin_error() {
        let send = SendPin(Rc::new(Cell::new(false)));
        let mut s = ChargeTimeSensor::new(send, BrokenPin, ChargeTimeConfig::default());
        assert_eq!(s.read_raw(), Err(TouchError::Pin));
    }
}
