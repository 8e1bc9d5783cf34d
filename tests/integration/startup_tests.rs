//! Startup join loop against the simulated station and a scripted one.

use std::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;

use super::mock_hw::MockDisplay;

use wastesorter::adapters::wifi::{ConnectivityError, ConnectivityPort, WifiAdapter};
use wastesorter::config::{self, SystemConfig};
use wastesorter::display;
use wastesorter::startup::{JoinPolicy, StartupPhase, join_network};

#[derive(Default)]
struct Sleeps(Vec<u32>);

impl DelayNs for Sleeps {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(ms);
    }
}

/// Station that fails with a scripted error sequence, then associates.
struct ScriptedStation {
    errors: Vec<ConnectivityError>,
    connected: bool,
}

impl ConnectivityPort for ScriptedStation {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.errors.is_empty() {
            self.connected = true;
            Ok(())
        } else {
            Err(self.errors.remove(0))
        }
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn set_credentials(&mut self, _ssid: &str, _password: &str) -> Result<(), ConnectivityError> {
        Ok(())
    }

    fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.connected.then(|| Ipv4Addr::new(10, 1, 2, 3))
    }
}

#[test]
fn boot_sequence_shows_progress_then_address() {
    let config = SystemConfig::default();
    let mut oled = MockDisplay::default();
    let mut wifi = WifiAdapter::with_simulated_failures(3);
    wifi.set_credentials(config::WIFI_SSID, config::WIFI_PASS).unwrap();
    let mut sleeps = Sleeps::default();
    let mut phases = Vec::new();

    display::render_connecting(&mut oled).unwrap();
    join_network(&mut wifi, &config.join_policy(), &mut sleeps, |p| phases.push(p)).unwrap();
    let ip = wifi.ip_addr().unwrap();
    display::render_connected(&mut oled, ip).unwrap();

    assert_eq!(sleeps.0, vec![500, 500, 500]);
    assert_eq!(phases.last(), Some(&StartupPhase::Network { attempt: 4 }));
    assert_eq!(oled.frames[0], vec!["Connecting WiFi..."]);
    assert_eq!(oled.frames[1], vec!["WiFi Connected".to_string(), ip.to_string()]);
}

#[test]
fn configured_attempt_limit_is_honoured() {
    let config = SystemConfig::from_json(
        r#"{"wifi_retry_interval_ms": 250, "wifi_max_attempts": 2}"#,
    )
    .unwrap();
    let mut wifi = WifiAdapter::with_simulated_failures(u32::MAX);
    wifi.set_credentials("october", "october12").unwrap();
    let mut sleeps = Sleeps::default();

    let err = join_network(&mut wifi, &config.join_policy(), &mut sleeps, |_| {}).unwrap_err();
    assert_eq!(err, ConnectivityError::RetriesExhausted { attempts: 2 });
    assert_eq!(sleeps.0, vec![250]);
    assert_eq!(wifi.attempts(), 2);
}

#[test]
fn already_associated_counts_as_joined() {
    let mut station = ScriptedStation {
        errors: vec![ConnectivityError::AlreadyConnected],
        connected: true,
    };
    let mut sleeps = Sleeps::default();
    join_network(&mut station, &JoinPolicy::default(), &mut sleeps, |_| {}).unwrap();
    assert!(sleeps.0.is_empty());
}

#[test]
fn credential_error_mid_join_stops_retrying() {
    let mut station = ScriptedStation {
        errors: vec![
            ConnectivityError::ConnectionFailed,
            ConnectivityError::InvalidPassword,
        ],
        connected: false,
    };
    let mut sleeps = Sleeps::default();
    let err = join_network(&mut station, &JoinPolicy::default(), &mut sleeps, |_| {}).unwrap_err();
    assert_eq!(err, ConnectivityError::InvalidPassword);
    assert_eq!(sleeps.0, vec![500]);
    assert!(station.ip_addr().is_none());
}
