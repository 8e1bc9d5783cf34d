//! Boot sequence bookkeeping and the WiFi join loop.
//!
//! The firmware walks [`StartupPhase`]s in order before entering the
//! control loop.  The only phase that can block indefinitely is
//! `Network`: [`join_network`] retries at a fixed interval until the
//! station associates, or until a bounded [`JoinPolicy`] gives up.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::adapters::wifi::{ConnectivityError, ConnectivityPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    /// GPIO directions set, gate centered.
    Io,
    /// OLED initialized.
    Display,
    /// Joining the network, 1-based attempt number.
    Network { attempt: u32 },
    /// Status page listener bound.
    WebServer,
    Running,
}

impl fmt::Display for StartupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::Display => write!(f, "display"),
            Self::Network { attempt } => write!(f, "network (attempt {})", attempt),
            Self::WebServer => write!(f, "web server"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// How hard to try joining the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinPolicy {
    /// Fixed pause between attempts, no backoff.
    pub retry_interval_ms: u32,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for JoinPolicy {
    fn default() -> Self {
        Self {
            retry_interval_ms: 500,
            max_attempts: None,
        }
    }
}

/// Log a phase transition in the common format.
pub fn log_phase(phase: StartupPhase) {
    info!("Startup: {}", phase);
}

/// Join the network, reporting every attempt through `on_phase`.
///
/// Transient failures sleep `retry_interval_ms` and try again.  Credential
/// errors are returned at once since no amount of retrying fixes them.
/// A station that is already associated counts as success.
pub fn join_network<W, D>(
    wifi: &mut W,
    policy: &JoinPolicy,
    delay: &mut D,
    mut on_phase: impl FnMut(StartupPhase),
) -> Result<(), ConnectivityError>
where
    W: ConnectivityPort + ?Sized,
    D: DelayNs,
{
    let mut attempt: u32 = 1;
    loop {
        on_phase(StartupPhase::Network { attempt });
        match wifi.connect() {
            Ok(()) | Err(ConnectivityError::AlreadyConnected) => return Ok(()),
            Err(e) if e.is_permanent() => {
                warn!("WiFi: {}", e);
                return Err(e);
            }
            Err(_) => {
                info!(".");
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    return Err(ConnectivityError::RetriesExhausted { attempts: attempt });
                }
                delay.delay_ms(policy.retry_interval_ms);
                attempt = attempt.saturating_add(1);
            }
        }
    }
}
