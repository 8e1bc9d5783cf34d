//! Wet/dry routing decision.
//!
//! Evaluated fresh every control tick from the current sensor readings.
//! Nothing here remembers the previous tick.
//!
//! ```text
//!  presence? ──no──▶ Neutral / Idle / indicator off
//!     │yes
//!     ├─ wet in band ──▶ Wet / "Wet Bin"
//!     ├─ dry in band ──▶ Dry / "Dry Bin"
//!     └─ otherwise  ──▶ Neutral / "Waiting"
//! ```

use core::fmt;

/// Open distance interval in which a bin sensor counts as "material present".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBand {
    pub min_cm: f32,
    pub max_cm: f32,
}

impl DetectionBand {
    pub const fn new(min_cm: f32, max_cm: f32) -> Self {
        Self { min_cm, max_cm }
    }

    /// Strict on both ends.  A 0 cm timeout reading never matches a band
    /// whose lower bound is non-negative.
    pub fn contains(&self, distance_cm: f32) -> bool {
        distance_cm > self.min_cm && distance_cm < self.max_cm
    }
}

impl Default for DetectionBand {
    fn default() -> Self {
        Self::new(2.0, 15.0)
    }
}

/// One of the three fixed gate positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatePosition {
    Wet,
    Dry,
    Neutral,
}

/// Last routing decision, for display and the status page only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServoStatus {
    #[default]
    Idle,
    Waiting,
    WetBin,
    DryBin,
}

impl ServoStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Waiting => "Waiting",
            Self::WetBin => "Wet Bin",
            Self::DryBin => "Dry Bin",
        }
    }
}

impl fmt::Display for ServoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outputs of one routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub indicator_on: bool,
    pub position: GatePosition,
    pub status: ServoStatus,
}

/// Decide the gate position, indicator and status label for one tick.
///
/// Presence has unconditional priority; wet wins when both bins match.
pub fn decide(presence: bool, wet_cm: f32, dry_cm: f32, band: &DetectionBand) -> Decision {
    if !presence {
        return Decision {
            indicator_on: false,
            position: GatePosition::Neutral,
            status: ServoStatus::Idle,
        };
    }

    let (position, status) = if band.contains(wet_cm) {
        (GatePosition::Wet, ServoStatus::WetBin)
    } else if band.contains(dry_cm) {
        (GatePosition::Dry, ServoStatus::DryBin)
    } else {
        (GatePosition::Neutral, ServoStatus::Waiting)
    };

    Decision {
        indicator_on: true,
        position,
        status,
    }
}
