//! Sorter gate servo (SG90 class hobby servo).
//!
//! Position is set by the high time of a 50 Hz frame: 500 µs at 0°,
//! 2500 µs at 180°, linear in between.  The PWM channel is anything that
//! implements `embedded_hal::pwm::SetDutyCycle` (an LEDC channel on the
//! ESP32).

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::classify::GatePosition;
use crate::config::SystemConfig;
use crate::error::ActuatorError;

const PERIOD_US: u32 = 20_000; // 50 Hz
const MIN_PULSE_US: u32 = 500; // 0° position
const MAX_PULSE_US: u32 = 2500; // 180° position
const MAX_ANGLE: u8 = 180;

/// Servo angle for each gate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateAngles {
    pub wet: u8,
    pub dry: u8,
    pub neutral: u8,
}

impl GateAngles {
    pub fn angle_for(&self, position: GatePosition) -> u8 {
        match position {
            GatePosition::Wet => self.wet,
            GatePosition::Dry => self.dry,
            GatePosition::Neutral => self.neutral,
        }
    }
}

impl From<&SystemConfig> for GateAngles {
    fn from(config: &SystemConfig) -> Self {
        Self {
            wet: config.wet_angle_deg,
            dry: config.dry_angle_deg,
            neutral: config.neutral_angle_deg,
        }
    }
}

/// Convert an angle (clamped to 0–180) to a duty value on a channel
/// whose full scale is `max_duty`.
pub fn angle_to_duty(angle: u8, max_duty: u16) -> u16 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    let pulse_us = MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE);
    (pulse_us * u32::from(max_duty) / PERIOD_US) as u16
}

pub struct GateServo<P> {
    pwm: P,
    angles: GateAngles,
    position: Option<GatePosition>,
}

impl<P: SetDutyCycle> GateServo<P> {
    pub fn new(pwm: P, angles: GateAngles) -> Self {
        Self {
            pwm,
            angles,
            position: None,
        }
    }

    /// Drive the servo to a raw angle (0–180 degrees).
    pub fn set_angle(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let duty = angle_to_duty(angle, self.pwm.max_duty_cycle());
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    pub fn move_to(&mut self, position: GatePosition) -> Result<(), ActuatorError> {
        let angle = self.angles.angle_for(position);
        self.set_angle(angle)?;
        if self.position != Some(position) {
            debug!("Gate: {:?} ({}°)", position, angle);
        }
        self.position = Some(position);
        Ok(())
    }

    /// Last position successfully commanded.  `None` before the first move.
    pub fn position(&self) -> Option<GatePosition> {
        self.position
    }
}
