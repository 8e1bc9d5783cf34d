//! Wet/dry waste sorter firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod pins;
pub mod startup;
pub mod web;

// Drivers are generic over embedded-hal traits; the ESP-IDF peripheral
// handles are only named in main.rs.
pub mod adapters;
pub mod drivers;
pub mod sensors;
