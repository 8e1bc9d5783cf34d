//! System configuration parameters
//!
//! All tunable parameters for the sorter.  Defaults reproduce the
//! factory constants; a JSON override can be baked in at build time via
//! the `WASTESORTER_CONFIG` environment variable.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::classify::{DetectionBand, GatePosition};
use crate::drivers::servo::GateAngles;
use crate::startup::JoinPolicy;

/// SSID of the network the sorter joins at boot.
pub const WIFI_SSID: &str = match option_env!("WASTESORTER_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "october",
};

/// Pre-shared key for [`WIFI_SSID`].
pub const WIFI_PASS: &str = match option_env!("WASTESORTER_WIFI_PASS") {
    Some(pass) => pass,
    None => "october12",
};

/// Optional JSON override captured at build time.
pub const BUILD_CONFIG_JSON: Option<&str> = option_env!("WASTESORTER_CONFIG");

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Detection band ---
    /// Lower (exclusive) bound of the bin detection band, cm
    pub band_min_cm: f32,
    /// Upper (exclusive) bound of the bin detection band, cm
    pub band_max_cm: f32,

    // --- Ranging ---
    /// Maximum time to wait for an echo pulse (microseconds)
    pub echo_timeout_us: u32,

    // --- Gate ---
    pub wet_angle_deg: u8,
    pub dry_angle_deg: u8,
    pub neutral_angle_deg: u8,

    // --- Presence ---
    /// IR module pulls its output low when an object is present
    pub presence_active_low: bool,

    // --- Timing ---
    /// Delay at the end of each control pass (milliseconds)
    pub control_loop_interval_ms: u32,
    /// How long the "WiFi Connected" screen stays up (milliseconds)
    pub splash_ms: u32,
    /// Control ticks between telemetry log lines
    pub telemetry_interval_ticks: u32,

    // --- Network ---
    /// Pause between WiFi join attempts (milliseconds)
    pub wifi_retry_interval_ms: u32,
    /// Give up joining after this many attempts.  `None` = retry forever.
    pub wifi_max_attempts: Option<u32>,
    /// TCP port of the status page
    pub http_port: u16,
    /// Per-connection read timeout while parsing a request (milliseconds)
    pub http_read_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Detection band
            band_min_cm: 2.0,
            band_max_cm: 15.0,

            // Ranging
            echo_timeout_us: 30_000, // ~5 m round trip

            // Gate
            wet_angle_deg: 0,
            dry_angle_deg: 90,
            neutral_angle_deg: 45,

            // Presence
            presence_active_low: true,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            splash_ms: 2000,
            telemetry_interval_ticks: 60, // 1/min at 1 Hz

            // Network
            wifi_retry_interval_ms: 500,
            wifi_max_attempts: None,
            http_port: 80,
            http_read_timeout_ms: 200,
        }
    }
}

impl SystemConfig {
    /// Apply an optional override, falling back to defaults if it is rejected.
    pub fn resolve(override_json: Option<&str>) -> Self {
        let Some(json) = override_json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(cfg) => {
                info!("Config: build-time override applied");
                cfg
            }
            Err(e) => {
                warn!("Config: override rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse a JSON override.  Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject out-of-range values.  Never clamps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_min_cm.is_nan() || self.band_min_cm < 0.0 {
            return Err(ConfigError::ValidationFailed("band_min_cm must be >= 0"));
        }
        if self.band_max_cm.is_nan() || self.band_max_cm <= self.band_min_cm {
            return Err(ConfigError::ValidationFailed(
                "band_max_cm must be above band_min_cm",
            ));
        }
        if self.echo_timeout_us == 0 {
            return Err(ConfigError::ValidationFailed("echo_timeout_us must be > 0"));
        }
        if self.wet_angle_deg > 180 || self.dry_angle_deg > 180 || self.neutral_angle_deg > 180 {
            return Err(ConfigError::ValidationFailed("gate angles must be 0-180"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be > 0",
            ));
        }
        if self.wifi_retry_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "wifi_retry_interval_ms must be > 0",
            ));
        }
        if self.wifi_max_attempts == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "wifi_max_attempts must be > 0 when set",
            ));
        }
        if self.http_port == 0 {
            return Err(ConfigError::ValidationFailed("http_port must be > 0"));
        }
        Ok(())
    }

    pub fn band(&self) -> DetectionBand {
        DetectionBand::new(self.band_min_cm, self.band_max_cm)
    }

    /// Servo angle for a gate position.
    pub fn angle_for(&self, position: GatePosition) -> u8 {
        GateAngles::from(self).angle_for(position)
    }

    pub fn join_policy(&self) -> JoinPolicy {
        JoinPolicy {
            retry_interval_ms: self.wifi_retry_interval_ms,
            max_attempts: self.wifi_max_attempts,
        }
    }
}
