//! GPIO / peripheral pin assignments for the sorter main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Intake presence sensor (IR obstacle module)
// ---------------------------------------------------------------------------

/// Digital input: LOW = object in front of the intake (module is active-low).
pub const IR_PRESENCE_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Ultrasonic rangers (HC-SR04)
// ---------------------------------------------------------------------------

/// Wet bin ranger: trigger output.
pub const WET_TRIG_GPIO: i32 = 16;
/// Wet bin ranger: echo input.
pub const WET_ECHO_GPIO: i32 = 17;

/// Dry bin ranger: trigger output.
pub const DRY_TRIG_GPIO: i32 = 18;
/// Dry bin ranger: echo input.
pub const DRY_ECHO_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Sorter gate servo (SG90)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the servo signal line.
pub const SERVO_PWM_GPIO: i32 = 13;
/// Servo frame rate.  50 Hz = one 20 ms frame.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Status indicator
// ---------------------------------------------------------------------------

/// Digital output: HIGH = object present.
pub const STATUS_LED_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Bus clock for the OLED.
pub const I2C_FREQ_HZ: u32 = 400_000;
/// 7-bit address of the SSD1306 controller.
pub const OLED_I2C_ADDR: u8 = 0x3C;
