//! Mock hardware for integration tests.
//!
//! `MockHardware` replays scripted sensor snapshots and records every
//! actuator call so tests can assert on the full command history.  The
//! pin-level mocks below feed the real drivers through `HardwareAdapter`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use wastesorter::app::events::SorterEvent;
use wastesorter::app::ports::{ActuatorPort, EventSink, SensorPort, SensorSnapshot, StatusDisplay};
use wastesorter::classify::GatePosition;
use wastesorter::error::DisplayError;
use wastesorter::sensors::RangeFinder;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    MoveGate(GatePosition),
    SetIndicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Replays snapshots in order; repeats the last one once the script runs out.
pub struct MockHardware {
    script: VecDeque<SensorSnapshot>,
    last: SensorSnapshot,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: SensorSnapshot::default(),
            calls: Vec::new(),
        }
    }

    pub fn push(&mut self, presence: bool, wet_cm: f32, dry_cm: f32) -> &mut Self {
        self.script.push_back(SensorSnapshot {
            presence,
            wet_cm,
            dry_cm,
        });
        self
    }

    pub fn gate(&self) -> Option<GatePosition> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::MoveGate(p) => Some(*p),
            _ => None,
        })
    }

    pub fn indicator(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetIndicator(on) => Some(*on),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

impl ActuatorPort for MockHardware {
    fn move_gate(&mut self, position: GatePosition) {
        self.calls.push(ActuatorCall::MoveGate(position));
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetIndicator(on));
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<SorterEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&SorterEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &SorterEvent) {
        self.events.push(event.clone());
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Vec<String>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn last(&self) -> &[String] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl StatusDisplay for MockDisplay {
    fn show_lines(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.frames.push(lines.iter().map(|l| l.to_string()).collect());
        Ok(())
    }
}

// ── Pin-level mocks ───────────────────────────────────────────

/// Input whose level the test flips through a shared cell.
#[derive(Clone, Default)]
pub struct SharedLevel(pub Rc<Cell<bool>>);

impl ErrorType for SharedLevel {
    type Error = Infallible;
}

impl InputPin for SharedLevel {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// Output that records every level it was driven to.
#[derive(Clone, Default)]
pub struct RecordingOutput(pub Rc<RefCell<Vec<bool>>>);

impl ErrorType for RecordingOutput {
    type Error = Infallible;
}

impl OutputPin for RecordingOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

/// PWM channel with a 20 000-step scale, so duty equals pulse width in µs.
#[derive(Clone, Default)]
pub struct RecordingPwm(pub Rc<RefCell<Vec<u16>>>);

impl embedded_hal::pwm::ErrorType for RecordingPwm {
    type Error = Infallible;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.borrow_mut().push(duty);
        Ok(())
    }
}

/// Ranger reporting whatever distance the test last stored.
#[derive(Clone, Default)]
pub struct SharedRange(pub Rc<Cell<f32>>);

impl RangeFinder for SharedRange {
    fn measure_cm(&mut self) -> f32 {
        self.0.get()
    }
}
