//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | IR input, HC-SR04 pair   |
//! |                | ActuatorPort       | LEDC servo, indicator    |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | TimePort           | ESP32 system timer       |
//! | `wifi`         | ConnectivityPort   | ESP-IDF WiFi STA         |
//!
//! The display and the status page have their own modules
//! (`crate::display`, `crate::web`).

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
