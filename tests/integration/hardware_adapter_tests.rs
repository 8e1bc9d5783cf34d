//! HardwareAdapter wired to real drivers over mock pins.

use super::mock_hw::{LogSink, RecordingOutput, RecordingPwm, SharedLevel, SharedRange};

use wastesorter::adapters::hardware::HardwareAdapter;
use wastesorter::app::service::SorterService;
use wastesorter::classify::{GatePosition, ServoStatus};
use wastesorter::config::SystemConfig;
use wastesorter::drivers::servo::{GateAngles, GateServo};
use wastesorter::drivers::status_led::StatusLed;
use wastesorter::sensors::SensorHub;
use wastesorter::sensors::presence::PresenceSensor;

struct Rig {
    ir: SharedLevel,
    wet: SharedRange,
    dry: SharedRange,
    led: RecordingOutput,
    pwm: RecordingPwm,
    hw: HardwareAdapter<SharedLevel, SharedRange, SharedRange, RecordingPwm, RecordingOutput>,
}

fn rig() -> Rig {
    let config = SystemConfig::default();
    let ir = SharedLevel::default();
    // Active-low module: idle line is high.
    ir.0.set(true);
    let wet = SharedRange::default();
    let dry = SharedRange::default();
    let led = RecordingOutput::default();
    let pwm = RecordingPwm::default();
    let hw = HardwareAdapter::new(
        SensorHub::new(
            PresenceSensor::new(ir.clone(), config.presence_active_low),
            wet.clone(),
            dry.clone(),
        ),
        GateServo::new(pwm.clone(), GateAngles::from(&config)),
        StatusLed::new(led.clone()),
    );
    Rig { ir, wet, dry, led, pwm, hw }
}

#[test]
fn startup_parks_gate_at_45_degrees() {
    let mut r = rig();
    let mut app = SorterService::new(&SystemConfig::default());
    app.start(&mut r.hw, &mut LogSink::new());
    // 45° → 1000 µs pulse
    assert_eq!(r.pwm.0.borrow().as_slice(), &[1000]);
    assert_eq!(r.led.0.borrow().as_slice(), &[false]);
    assert_eq!(r.hw.gate_position(), Some(GatePosition::Neutral));
}

#[test]
fn low_ir_line_lights_indicator_and_routes() {
    let mut r = rig();
    let mut sink = LogSink::new();
    let mut app = SorterService::new(&SystemConfig::default());
    app.start(&mut r.hw, &mut sink);

    r.ir.0.set(false);
    r.wet.0.set(40.0);
    r.dry.0.set(6.0);
    app.tick(&mut r.hw, &mut sink);

    assert_eq!(app.state().status, ServoStatus::DryBin);
    assert!(r.hw.indicator_on());
    // 90° → 1500 µs pulse
    assert_eq!(r.pwm.0.borrow().last(), Some(&1500));

    r.wet.0.set(3.0);
    app.tick(&mut r.hw, &mut sink);
    // 0° → 500 µs pulse
    assert_eq!(r.pwm.0.borrow().last(), Some(&500));
    assert_eq!(r.hw.gate_position(), Some(GatePosition::Wet));

    r.ir.0.set(true);
    app.tick(&mut r.hw, &mut sink);
    assert!(!r.hw.indicator_on());
    assert_eq!(r.led.0.borrow().last(), Some(&false));
}
