//! The sorter's status page.

use core::fmt::Write;

use crate::app::state::SorterState;

use super::http::{Body, Request, RequestHandler, Response};

/// Serves the page on `/` from the live sorter state, whatever the method.
pub struct StatusHandler<'a> {
    state: &'a SorterState,
}

impl<'a> StatusHandler<'a> {
    pub fn new(state: &'a SorterState) -> Self {
        Self { state }
    }
}

impl RequestHandler for StatusHandler<'_> {
    fn handle(&self, req: &Request<'_>) -> Response {
        match req.path {
            "/" => Response::html(render_page(self.state)),
            _ => Response::not_found(),
        }
    }
}

pub fn render_page(state: &SorterState) -> Body {
    let mut html = Body::new();
    let ir = if state.presence { "Object Detected" } else { "None" };
    // The page is well under capacity; overflow would only truncate.
    let _ = write!(
        html,
        "<html><head><title>Waste Sorter</title></head><body>\
         <h1>Smart Waste Sorter</h1>\
         <p><strong>IR Sensor:</strong> {}</p>\
         <p><strong>Wet Distance:</strong> {:.2} cm</p>\
         <p><strong>Dry Distance:</strong> {:.2} cm</p>\
         <p><strong>Servo Status:</strong> {}</p>\
         </body></html>",
        ir,
        state.wet_cm,
        state.dry_cm,
        state.status.label(),
    );
    html
}
