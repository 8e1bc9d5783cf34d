//! Status display: layouts plus the SSD1306 panel driver.

pub mod screen;
pub mod ssd1306;

pub use ssd1306::Ssd1306;

use std::net::Ipv4Addr;

use crate::app::ports::StatusDisplay;
use crate::app::state::SorterState;
use crate::error::DisplayError;

/// Clear and redraw the per-tick status screen.
pub fn render_status(
    display: &mut (impl StatusDisplay + ?Sized),
    state: &SorterState,
) -> Result<(), DisplayError> {
    let lines = screen::status_lines(state);
    let rows: [&str; 4] = core::array::from_fn(|i| lines[i].as_str());
    display.show_lines(&rows)
}

pub fn render_connecting(display: &mut (impl StatusDisplay + ?Sized)) -> Result<(), DisplayError> {
    display.show_lines(&[screen::CONNECTING])
}

pub fn render_connected(
    display: &mut (impl StatusDisplay + ?Sized),
    ip: Ipv4Addr,
) -> Result<(), DisplayError> {
    let lines = screen::connected_lines(ip);
    display.show_lines(&[lines[0].as_str(), lines[1].as_str()])
}
