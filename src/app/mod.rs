//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the sorter: reading the
//! sensors once per tick, routing the gate, and keeping the live state
//! the display and status page render from.  All interaction with
//! hardware happens through **port traits** defined in [`ports`].

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
