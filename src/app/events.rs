//! Outbound application events.
//!
//! The [`SorterService`](super::service::SorterService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial today.

use crate::classify::ServoStatus;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum SorterEvent {
    /// The service has started and the gate is parked at neutral.
    Started,

    /// The routing status label changed.
    StatusChanged { from: ServoStatus, to: ServoStatus },

    /// The intake presence flag flipped.
    PresenceChanged(bool),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub tick: u64,
    pub presence: bool,
    pub wet_cm: f32,
    pub dry_cm: f32,
    pub status: ServoStatus,
}
