//! Fixed text layouts for the status display.

use core::fmt::Write;
use std::net::Ipv4Addr;

use crate::app::state::SorterState;

/// One rendered display row.  21 glyphs fit the panel; longer text is cut.
pub type Line = heapless::String<32>;

pub const CONNECTING: &str = "Connecting WiFi...";
pub const CONNECTED: &str = "WiFi Connected";

/// The four-row screen redrawn every control tick.
pub fn status_lines(state: &SorterState) -> [Line; 4] {
    let mut lines: [Line; 4] = Default::default();
    // Overflow only truncates the row.
    let _ = write!(lines[0], "IR: {}", if state.presence { "Object" } else { "None" });
    let _ = write!(lines[1], "Wet Dist: {:.2} cm", state.wet_cm);
    let _ = write!(lines[2], "Dry Dist: {:.2} cm", state.dry_cm);
    let _ = write!(lines[3], "Servo: {}", state.status.label());
    lines
}

/// Splash shown once the station has an address.
pub fn connected_lines(ip: Ipv4Addr) -> [Line; 2] {
    let mut lines: [Line; 2] = Default::default();
    let _ = lines[0].push_str(CONNECTED);
    let _ = write!(lines[1], "{}", ip);
    lines
}
