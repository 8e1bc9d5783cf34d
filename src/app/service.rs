//! Application service — the hexagonal core.
//!
//! [`SorterService`] owns the live [`SorterState`] and runs one control
//! pass per tick.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     SorterService       │
//! ActuatorPort ◀──│  decide · SorterState   │
//!                 └────────────────────────┘
//! ```

use log::{debug, info};

use crate::classify::{DetectionBand, GatePosition, decide};
use crate::config::SystemConfig;

use super::events::{SorterEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::state::SorterState;

// ───────────────────────────────────────────────────────────────
// SorterService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SorterService {
    band: DetectionBand,
    telemetry_interval_ticks: u32,
    state: SorterState,
    tick_count: u64,
}

impl SorterService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            band: config.band(),
            telemetry_interval_ticks: config.telemetry_interval_ticks,
            state: SorterState::default(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the gate at neutral with the indicator off.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.move_gate(GatePosition::Neutral);
        hw.set_indicator(false);
        self.state = SorterState::default();
        sink.emit(&SorterEvent::Started);
        info!("SorterService started, gate at neutral");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control pass: read sensors → decide → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev = self.state;

        // 1. Read sensors via SensorPort
        let snap = hw.read_all();

        // 2. Decide from this tick's readings only
        let decision = decide(snap.presence, snap.wet_cm, snap.dry_cm, &self.band);

        // 3. Apply via ActuatorPort
        hw.set_indicator(decision.indicator_on);
        hw.move_gate(decision.position);

        self.state = SorterState {
            presence: snap.presence,
            wet_cm: snap.wet_cm,
            dry_cm: snap.dry_cm,
            status: decision.status,
            position: decision.position,
            indicator_on: decision.indicator_on,
        };
        debug!(
            "tick {}: presence={} wet={:.2}cm dry={:.2}cm -> {}",
            self.tick_count, snap.presence, snap.wet_cm, snap.dry_cm, decision.status
        );

        // 4. Emit transitions
        if prev.presence != snap.presence {
            sink.emit(&SorterEvent::PresenceChanged(snap.presence));
        }
        if prev.status != decision.status {
            sink.emit(&SorterEvent::StatusChanged {
                from: prev.status,
                to: decision.status,
            });
        }
        if self.telemetry_interval_ticks > 0
            && self.tick_count % u64::from(self.telemetry_interval_ticks) == 0
        {
            sink.emit(&SorterEvent::Telemetry(self.build_telemetry()));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Live state, as written by the last tick.
    pub fn state(&self) -> &SorterState {
        &self.state
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            tick: self.tick_count,
            presence: self.state.presence,
            wet_cm: self.state.wet_cm,
            dry_cm: self.state.dry_cm,
            status: self.state.status,
        }
    }
}
