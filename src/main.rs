//! Waste sorter firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter   LogEventSink   Ssd1306      HttpResponder │
//! │  (Sensor+Actuator) (EventSink)    (Display)    (status page) │
//! │  WifiAdapter       Esp32Time                                 │
//! │  (Connectivity)    (TimePort)                                │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            SorterService (pure logic)                  │  │
//! │  │            decide · SorterState                        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One thread, one loop: read sensors, drive the gate, redraw the OLED,
//! answer queued HTTP requests, sleep.
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info, warn};

use wastesorter::adapters::hardware::HardwareAdapter;
use wastesorter::adapters::log_sink::LogEventSink;
use wastesorter::adapters::time::Esp32TimeAdapter;
use wastesorter::adapters::wifi::{ConnectivityPort, WifiAdapter};
use wastesorter::app::service::SorterService;
use wastesorter::config::{self, SystemConfig};
use wastesorter::display::{self, Ssd1306};
use wastesorter::drivers::servo::{GateAngles, GateServo};
use wastesorter::drivers::status_led::StatusLed;
use wastesorter::pins;
use wastesorter::sensors::SensorHub;
use wastesorter::sensors::presence::PresenceSensor;
use wastesorter::sensors::ultrasonic::HcSr04;
use wastesorter::startup::{StartupPhase, join_network, log_phase};
use wastesorter::web::{HttpResponder, StatusHandler};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  WasteSorter v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::resolve(config::BUILD_CONFIG_JSON);
    let peripherals =
        Peripherals::take().map_err(|_| wastesorter::error::Error::Init("peripherals already taken"))?;
    let clock = Esp32TimeAdapter::new();

    // ── 2. I/O: sensors, gate, indicator ──────────────────────
    log_phase(StartupPhase::Io);

    // SAFETY: each GPIO number below appears exactly once in pins.rs and
    // is claimed exactly once here; `peripherals.pins` is never used.
    let (ir, wet_trig, wet_echo, dry_trig, dry_echo, led, servo, sda, scl) = unsafe {
        (
            AnyInputPin::new(pins::IR_PRESENCE_GPIO),
            AnyOutputPin::new(pins::WET_TRIG_GPIO),
            AnyInputPin::new(pins::WET_ECHO_GPIO),
            AnyOutputPin::new(pins::DRY_TRIG_GPIO),
            AnyInputPin::new(pins::DRY_ECHO_GPIO),
            AnyOutputPin::new(pins::STATUS_LED_GPIO),
            AnyOutputPin::new(pins::SERVO_PWM_GPIO),
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
        )
    };

    let sensor_hub = SensorHub::new(
        PresenceSensor::new(PinDriver::input(ir)?, config.presence_active_low),
        HcSr04::new(
            PinDriver::output(wet_trig)?,
            PinDriver::input(wet_echo)?,
            Ets,
            clock,
            config.echo_timeout_us,
        ),
        HcSr04::new(
            PinDriver::output(dry_trig)?,
            PinDriver::input(dry_echo)?,
            Ets,
            clock,
            config.echo_timeout_us,
        ),
    );

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits14),
    )?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, servo)?;

    let mut hw = HardwareAdapter::new(
        sensor_hub,
        GateServo::new(servo_pwm, GateAngles::from(&config)),
        StatusLed::new(PinDriver::output(led)?),
    );

    let mut log_sink = LogEventSink::new();
    let mut service = SorterService::new(&config);
    service.start(&mut hw, &mut log_sink);

    // ── 3. Display ────────────────────────────────────────────
    log_phase(StartupPhase::Display);
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        sda,
        scl,
        &I2cConfig::new().baudrate(pins::I2C_FREQ_HZ.Hz()),
    )?;
    let mut oled = Ssd1306::new(i2c, pins::OLED_I2C_ADDR);
    if let Err(e) = oled.init() {
        // Without a display the unit cannot report anything locally.
        error!("SSD1306 init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Network ────────────────────────────────────────────
    if let Err(e) = display::render_connecting(&mut oled) {
        warn!("Display: {}", e);
    }

    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let driver = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;
    let mut wifi = WifiAdapter::new(driver);
    wifi.set_credentials(config::WIFI_SSID, config::WIFI_PASS)?;
    info!("Connecting to '{}'", config::WIFI_SSID);
    join_network(&mut wifi, &config.join_policy(), &mut FreeRtos, log_phase)?;

    match wifi.ip_addr() {
        Some(ip) => {
            info!("Connected to WiFi, IP {}", ip);
            if let Err(e) = display::render_connected(&mut oled, ip) {
                warn!("Display: {}", e);
            }
        }
        None => warn!("Connected to WiFi but no address reported"),
    }
    FreeRtos::delay_ms(config.splash_ms);

    // ── 5. Web server ─────────────────────────────────────────
    log_phase(StartupPhase::WebServer);
    let mut http = HttpResponder::bind(config.http_port, config.http_read_timeout_ms)?;
    info!("Web server started");

    // ── 6. Control loop ───────────────────────────────────────
    log_phase(StartupPhase::Running);
    loop {
        service.tick(&mut hw, &mut log_sink);

        if let Err(e) = display::render_status(&mut oled, service.state()) {
            warn!("Display: {}", e);
        }

        http.poll(&StatusHandler::new(service.state()));

        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
