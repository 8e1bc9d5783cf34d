//! HC-SR04 ultrasonic ranger driver.
//!
//! A 10 µs trigger pulse fires an 8-cycle 40 kHz burst; the module then
//! holds ECHO high for the round-trip time of flight.  The whole echo
//! measurement shares one deadline — a missing echo reads as 0 µs, which
//! converts to 0 cm.
//!
//! Blocking by design: worst case one call costs `timeout_us` plus the
//! 12 µs trigger sequence.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::TimePort;
use crate::error::SensorError;

use super::RangeFinder;

/// Speed of sound in cm/µs, round trip halved by [`duration_to_cm`].
pub const SOUND_CM_PER_US: f32 = 0.034;

/// Settle time with TRIG held low before the pulse.
const TRIG_SETTLE_US: u32 = 2;
/// Width of the trigger pulse.
const TRIG_PULSE_US: u32 = 10;

/// Convert an echo pulse width to a one-way distance.
pub fn duration_to_cm(duration_us: u32) -> f32 {
    duration_us as f32 * SOUND_CM_PER_US / 2.0
}

pub struct HcSr04<T, E, D, C> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<T, E, D, C> HcSr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: TimePort,
{
    pub fn new(trig: T, echo: E, delay: D, clock: C, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    /// Fire one ping and return the echo pulse width in µs (0 on timeout).
    pub fn echo_duration_us(&mut self) -> Result<u32, SensorError> {
        self.trigger()?;
        self.pulse_in_high()
    }

    fn trigger(&mut self) -> Result<(), SensorError> {
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(TRIG_SETTLE_US);
        self.trig.set_high().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(TRIG_PULSE_US);
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)
    }

    /// Pulse-in on ECHO: skip a pulse already in progress, wait for the
    /// rising edge, then time the high level.
    fn pulse_in_high(&mut self) -> Result<u32, SensorError> {
        let deadline = self.clock.uptime_us() + u64::from(self.timeout_us);

        while self.echo_is_high()? {
            if self.clock.uptime_us() >= deadline {
                return Ok(0);
            }
        }
        while !self.echo_is_high()? {
            if self.clock.uptime_us() >= deadline {
                return Ok(0);
            }
        }
        let rise = self.clock.uptime_us();
        while self.echo_is_high()? {
            if self.clock.uptime_us() >= deadline {
                return Ok(0);
            }
        }
        let fall = self.clock.uptime_us();

        Ok(fall.saturating_sub(rise) as u32)
    }

    fn echo_is_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)
    }
}

impl<T, E, D, C> RangeFinder for HcSr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: TimePort,
{
    fn measure_cm(&mut self) -> f32 {
        match self.echo_duration_us() {
            Ok(us) => duration_to_cm(us),
            Err(e) => {
                warn!("HC-SR04: {} — reporting 0 cm", e);
                0.0
            }
        }
    }
}
