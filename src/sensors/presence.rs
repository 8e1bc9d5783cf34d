//! IR obstacle sensor at the intake.
//!
//! The common FC-51 style module pulls its output LOW while an object
//! reflects the IR beam.  Polarity is configurable for modules that
//! drive HIGH instead.

use embedded_hal::digital::InputPin;
use log::warn;

pub struct PresenceSensor<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> PresenceSensor<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// `true` while an object is in front of the intake.  A read error
    /// counts as "nothing there".
    pub fn is_present(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(_) => {
                warn!("Presence: GPIO read failed, assuming no object");
                false
            }
        }
    }
}
