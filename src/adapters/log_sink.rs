//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured sorter events to the
//! logger (which goes to the UART console in production).

use log::info;

use crate::app::events::SorterEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SorterEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SorterEvent) {
        match event {
            SorterEvent::Telemetry(t) => {
                info!(
                    "TELEM | tick={} | IR={} | wet={:.2}cm dry={:.2}cm | servo={}",
                    t.tick,
                    if t.presence { "Object" } else { "None" },
                    t.wet_cm,
                    t.dry_cm,
                    t.status,
                );
            }
            SorterEvent::StatusChanged { from, to } => {
                info!("STATUS | {} -> {}", from, to);
            }
            SorterEvent::PresenceChanged(present) => {
                info!("PRESENCE | {}", if *present { "object detected" } else { "cleared" });
            }
            SorterEvent::Started => {
                info!("START | gate at neutral");
            }
        }
    }
}
