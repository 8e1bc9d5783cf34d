//! Presence indicator LED.
//!
//! A single GPIO output, HIGH = lit.  Tracks the commanded state so the
//! hardware adapter and tests can query it without reading the pin back.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct StatusLed<L> {
    pin: L,
    on: bool,
}

impl<L: OutputPin> StatusLed<L> {
    pub fn new(pin: L) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
        .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
