//! Live sorter state.
//!
//! Written once per control tick by [`SorterService`](super::service::SorterService)
//! and read by the display renderer and the status page handler.  The
//! firmware is single-threaded, so readers borrow it directly.

use crate::classify::{GatePosition, ServoStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SorterState {
    /// Object in front of the intake.
    pub presence: bool,
    /// Latest wet bin distance, cm.
    pub wet_cm: f32,
    /// Latest dry bin distance, cm.
    pub dry_cm: f32,
    /// Last routing decision label.
    pub status: ServoStatus,
    /// Gate position commanded this tick.
    pub position: GatePosition,
    /// Indicator output commanded this tick.
    pub indicator_on: bool,
}

impl Default for SorterState {
    fn default() -> Self {
        Self {
            presence: false,
            wet_cm: 0.0,
            dry_cm: 0.0,
            status: ServoStatus::Idle,
            position: GatePosition::Neutral,
            indicator_on: false,
        }
    }
}
