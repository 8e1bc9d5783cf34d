//! Status webpage server.
//!
//! [`HttpResponder`] owns the listening socket; [`StatusHandler`] renders
//! the page from the live [`SorterState`](crate::app::state::SorterState)
//! at request time.

pub mod http;
pub mod status_page;

pub use http::{HttpResponder, Request, RequestHandler, Response};
pub use status_page::StatusHandler;
