//! Integration tests for the SorterService → decision → actuators pipeline.
//!
//! These run on the host (x86_64) and drive whole control passes against
//! scripted sensor readings.

use super::mock_hw::{ActuatorCall, LogSink, MockDisplay, MockHardware};

use wastesorter::app::events::SorterEvent;
use wastesorter::app::service::SorterService;
use wastesorter::classify::{GatePosition, ServoStatus};
use wastesorter::config::SystemConfig;
use wastesorter::display;

fn make_app() -> (SorterService, MockHardware, LogSink) {
    let mut app = SorterService::new(&SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

#[test]
fn start_centers_gate_before_anything_else() {
    let (app, hw, sink) = make_app();
    assert_eq!(hw.calls[0], ActuatorCall::MoveGate(GatePosition::Neutral));
    assert_eq!(hw.indicator(), Some(false));
    assert!(matches!(sink.events[0], SorterEvent::Started));
    assert_eq!(app.state().status, ServoStatus::Idle);
    assert_eq!(app.tick_count(), 0);
}

#[test]
fn object_arrives_is_routed_then_clears() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(false, 0.0, 0.0)
        .push(true, 30.0, 30.0)
        .push(true, 30.0, 9.5)
        .push(true, 5.0, 9.5)
        .push(false, 5.0, 9.5);

    let mut seen = Vec::new();
    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
        seen.push((app.state().status, hw.gate(), hw.indicator()));
    }

    assert_eq!(
        seen,
        vec![
            (ServoStatus::Idle, Some(GatePosition::Neutral), Some(false)),
            (ServoStatus::Waiting, Some(GatePosition::Neutral), Some(true)),
            (ServoStatus::DryBin, Some(GatePosition::Dry), Some(true)),
            // Wet wins the tie
            (ServoStatus::WetBin, Some(GatePosition::Wet), Some(true)),
            (ServoStatus::Idle, Some(GatePosition::Neutral), Some(false)),
        ]
    );

    let changes = sink.count(|e| matches!(e, SorterEvent::StatusChanged { .. }));
    assert_eq!(changes, 4);
    let presence = sink.count(|e| matches!(e, SorterEvent::PresenceChanged(_)));
    assert_eq!(presence, 2);
}

#[test]
fn timeouts_and_band_edges_never_route() {
    let (mut app, mut hw, mut sink) = make_app();
    for (wet, dry) in [(0.0, 0.0), (2.0, 15.0), (15.0, 2.0), (1.99, 15.01)] {
        hw.push(true, wet, dry);
        app.tick(&mut hw, &mut sink);
        assert_eq!(app.state().status, ServoStatus::Waiting, "wet={wet} dry={dry}");
        assert_eq!(hw.gate(), Some(GatePosition::Neutral));
    }
}

#[test]
fn no_presence_overrides_in_band_readings() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(false, 5.0, 5.0);
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state().status, ServoStatus::Idle);
    assert_eq!(hw.gate(), Some(GatePosition::Neutral));
    assert_eq!(hw.indicator(), Some(false));
}

#[test]
fn each_tick_reads_fresh_values_only() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.push(true, 5.0, 30.0).push(true, 30.0, 30.0);
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state().status, ServoStatus::WetBin);
    app.tick(&mut hw, &mut sink);
    // Previous wet routing does not stick.
    assert_eq!(app.state().status, ServoStatus::Waiting);
}

#[test]
fn telemetry_follows_configured_interval() {
    let config = SystemConfig {
        telemetry_interval_ticks: 3,
        ..SystemConfig::default()
    };
    let mut app = SorterService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    hw.push(true, 7.0, 30.0);
    for _ in 0..7 {
        app.tick(&mut hw, &mut sink);
    }
    let ticks: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            SorterEvent::Telemetry(t) => Some(t.tick),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![3, 6]);
}

#[test]
fn display_redraws_state_after_each_tick() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut oled = MockDisplay::default();
    hw.push(true, 12.0, 3.25).push(false, 0.0, 0.0);

    app.tick(&mut hw, &mut sink);
    display::render_status(&mut oled, app.state()).unwrap();
    assert_eq!(
        oled.last(),
        ["IR: Object", "Wet Dist: 12.00 cm", "Dry Dist: 3.25 cm", "Servo: Wet Bin"]
    );

    app.tick(&mut hw, &mut sink);
    display::render_status(&mut oled, app.state()).unwrap();
    assert_eq!(oled.last()[0], "IR: None");
    assert_eq!(oled.last()[3], "Servo: Idle");
    assert_eq!(oled.frames.len(), 2);
}

#[test]
fn display_failure_does_not_disturb_control() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut oled = MockDisplay {
        fail: true,
        ..MockDisplay::default()
    };
    hw.push(true, 30.0, 4.0);
    app.tick(&mut hw, &mut sink);
    assert!(display::render_status(&mut oled, app.state()).is_err());
    assert_eq!(hw.gate(), Some(GatePosition::Dry));
}
