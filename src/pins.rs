//! GPIO / peripheral pin assignments for the actuator board.
//!
//! Single source of truth for the default [`ActuatorConfig`](crate::config::ActuatorConfig).
//! Boards with a different layout override these through the config rather
//! than editing drivers.

/// Physical pin identifier (GPIO number).
pub type PinId = u8;

// ---------------------------------------------------------------------------
// FET channels (solenoids / heaters, active-low gate drivers)
// ---------------------------------------------------------------------------

pub const FET_GPIOS: [PinId; 4] = [25, 26, 27, 14];

// ---------------------------------------------------------------------------
// H-bridge motor drivers
// ---------------------------------------------------------------------------

/// Pin pair for one H-bridge channel.
///
/// The PWM drive is routed to `a` for forward and `b` for reverse; the
/// released leg is held low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeGpios {
    pub a: PinId,
    pub b: PinId,
}

pub const HBRIDGE_GPIOS: [BridgeGpios; 2] = [
    BridgeGpios { a: 32, b: 33 },
    BridgeGpios { a: 18, b: 19 },
];

/// Digital output: shared H-bridge power bus enable (active HIGH).
pub const HBRIDGE_POWER_GPIO: PinId = 23;

// ---------------------------------------------------------------------------
// Indicator LED
// ---------------------------------------------------------------------------

pub const LED_GPIO: PinId = 2;

// ---------------------------------------------------------------------------
// Stepper driver (STEP/DIR interface)
// ---------------------------------------------------------------------------

/// Digital output: driver enable, active LOW.
pub const MOTOR_ENABLE_GPIO: PinId = 4;
pub const MOTOR_STEP_GPIO: PinId = 16;
pub const MOTOR_DIR_GPIO: PinId = 17;

// ---------------------------------------------------------------------------
// Stepper defaults
// ---------------------------------------------------------------------------

/// Full steps per revolution of a 1.8° motor.
pub const MOTOR_STEPS_PER_REV: u16 = 200;
/// Acceleration handed to the motion service (rev/s²).
pub const MOTOR_ACCEL_REV_PER_S2: f32 = 1.0;
/// Relative target issued by `run_motor` (revolutions).
pub const MOTOR_RUN_TARGET_REVS: f32 = 10_000.0;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// PWM resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
