//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick.  Reads are sequential: presence, then the wet ranger, then the
//! dry ranger, so a tick blocks for at most two echo timeouts.

pub mod presence;
pub mod ultrasonic;

use embedded_hal::digital::InputPin;

use crate::app::ports::SensorSnapshot;
use presence::PresenceSensor;

/// Anything that reports a one-way distance in centimetres.
/// 0 means no echo arrived in time.
pub trait RangeFinder {
    fn measure_cm(&mut self) -> f32;
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<P, W, D> {
    pub presence: PresenceSensor<P>,
    pub wet: W,
    pub dry: D,
}

impl<P, W, D> SensorHub<P, W, D>
where
    P: InputPin,
    W: RangeFinder,
    D: RangeFinder,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(presence: PresenceSensor<P>, wet: W, dry: D) -> Self {
        Self { presence, wet, dry }
    }

    /// Read every sensor and return a unified snapshot.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let presence = self.presence.is_present();
        let wet_cm = self.wet.measure_cm();
        let dry_cm = self.dry.measure_cm();

        SensorSnapshot {
            presence,
            wet_cm,
            dry_cm,
        }
    }
}
