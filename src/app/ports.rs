//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SorterService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, event sinks) implement
//! these traits.  The [`SorterService`](super::service::SorterService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::classify::GatePosition;
use crate::error::DisplayError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A point-in-time reading of every sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Object in front of the intake.
    pub presence: bool,
    /// Wet bin ranger, cm.  0 when the echo timed out.
    pub wet_cm: f32,
    /// Dry bin ranger, cm.  0 when the echo timed out.
    pub dry_cm: f32,
}

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Swing the sorter gate to one of its fixed positions.
    fn move_gate(&mut self, position: GatePosition);

    /// Switch the presence indicator.
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Text-only status display.  Every call replaces the whole screen.
pub trait StatusDisplay {
    fn show_lines(&mut self, lines: &[&str]) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`SorterEvent`](super::events::SorterEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::SorterEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock used to time echo pulses.
pub trait TimePort {
    fn uptime_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Override failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("override corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
