//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  Drivers are generic over
//! `embedded-hal` traits, so the same adapter runs on ESP-IDF pins and on
//! host-side mock pins.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort, SensorSnapshot};
use crate::classify::GatePosition;
use crate::drivers::servo::GateServo;
use crate::drivers::status_led::StatusLed;
use crate::sensors::{RangeFinder, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, W, D, S, L> {
    sensor_hub: SensorHub<P, W, D>,
    gate: GateServo<S>,
    led: StatusLed<L>,
}

impl<P, W, D, S, L> HardwareAdapter<P, W, D, S, L>
where
    S: SetDutyCycle,
    L: OutputPin,
{
    pub fn new(sensor_hub: SensorHub<P, W, D>, gate: GateServo<S>, led: StatusLed<L>) -> Self {
        Self {
            sensor_hub,
            gate,
            led,
        }
    }

    pub fn gate_position(&self) -> Option<GatePosition> {
        self.gate.position()
    }

    pub fn indicator_on(&self) -> bool {
        self.led.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, W, D, S, L> SensorPort for HardwareAdapter<P, W, D, S, L>
where
    P: InputPin,
    W: RangeFinder,
    D: RangeFinder,
{
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, W, D, S, L> ActuatorPort for HardwareAdapter<P, W, D, S, L>
where
    S: SetDutyCycle,
    L: OutputPin,
{
    fn move_gate(&mut self, position: GatePosition) {
        if let Err(e) = self.gate.move_to(position) {
            warn!("Gate: move to {:?} failed — {}", position, e);
        }
    }

    fn set_indicator(&mut self, on: bool) {
        if let Err(e) = self.led.set(on) {
            warn!("Indicator: {}", e);
        }
    }
}
