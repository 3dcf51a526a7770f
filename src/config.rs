//! Actuator board configuration.
//!
//! Pin maps and stepper parameters for one board.  Defaults come from
//! [`crate::pins`]; a board variant can supply its own map as JSON.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins::{self, BridgeGpios, PinId};

/// Fixed capacity for FET channels.
pub const MAX_FETS: usize = 8;
/// Fixed capacity for H-bridge channels.
pub const MAX_BRIDGES: usize = 4;
/// PWM generators available for routing (LEDC channels on ESP32-S3).
pub const PWM_SLOTS: usize = 8;

/// Pin pair for one H-bridge channel, serialisable form of [`BridgeGpios`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgePins {
    /// Forward leg.
    pub a: PinId,
    /// Reverse leg.
    pub b: PinId,
}

impl From<BridgeGpios> for BridgePins {
    fn from(g: BridgeGpios) -> Self {
        Self { a: g.a, b: g.b }
    }
}

/// Stepper driver wiring and motion-service parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Driver enable line (active LOW).
    pub enable_pin: PinId,
    pub step_pin: PinId,
    pub dir_pin: PinId,
    pub steps_per_revolution: u16,
    /// Acceleration handed to the motion service (rev/s²).
    pub acceleration_rev_per_s2: f32,
    /// Relative target issued by `run_motor` (revolutions).
    pub run_target_revs: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            enable_pin: pins::MOTOR_ENABLE_GPIO,
            step_pin: pins::MOTOR_STEP_GPIO,
            dir_pin: pins::MOTOR_DIR_GPIO,
            steps_per_revolution: pins::MOTOR_STEPS_PER_REV,
            acceleration_rev_per_s2: pins::MOTOR_ACCEL_REV_PER_S2,
            run_target_revs: pins::MOTOR_RUN_TARGET_REVS,
        }
    }
}

/// Full actuator board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    /// FET gate pins, in channel order.
    pub fet_pins: Vec<PinId, MAX_FETS>,
    /// H-bridge leg pairs, in channel order.
    pub hbridge_pins: Vec<BridgePins, MAX_BRIDGES>,
    /// Shared H-bridge power bus enable (active HIGH).
    pub hbridge_power_pin: PinId,
    pub led_pin: PinId,
    pub motor: MotorConfig,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        let mut fet_pins = Vec::new();
        for &pin in &pins::FET_GPIOS {
            // FET_GPIOS is shorter than MAX_FETS.
            let _ = fet_pins.push(pin);
        }
        let mut hbridge_pins = Vec::new();
        for &pair in &pins::HBRIDGE_GPIOS {
            let _ = hbridge_pins.push(pair.into());
        }

        Self {
            fet_pins,
            hbridge_pins,
            hbridge_power_pin: pins::HBRIDGE_POWER_GPIO,
            led_pin: pins::LED_GPIO,
            motor: MotorConfig::default(),
        }
    }
}

impl ActuatorConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config parse failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Number of PWM slots this config consumes: one per FET, one per bridge.
    pub fn pwm_slots_needed(&self) -> usize {
        self.fet_pins.len() + self.hbridge_pins.len()
    }

    /// Check every wiring invariant.
    ///
    /// Rejects duplicate GPIOs across all outputs, bridges whose legs share
    /// a GPIO, PWM slot over-subscription, and degenerate stepper params.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, pair) in self.hbridge_pins.iter().enumerate() {
            if pair.a == pair.b {
                return Err(ConfigError::BridgeLegsShared { index });
            }
        }

        let needed = self.pwm_slots_needed();
        if needed > PWM_SLOTS {
            return Err(ConfigError::PwmSlotsExhausted {
                needed,
                available: PWM_SLOTS,
            });
        }

        let mut seen: Vec<PinId, { MAX_FETS + 2 * MAX_BRIDGES + 5 }> = Vec::new();
        for pin in self.all_pins() {
            if seen.contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            // Capacity covers every pin all_pins() can yield.
            let _ = seen.push(pin);
        }

        let m = &self.motor;
        if m.steps_per_revolution == 0 {
            return Err(ConfigError::ZeroStepsPerRevolution);
        }
        if !m.acceleration_rev_per_s2.is_finite() || m.acceleration_rev_per_s2 <= 0.0 {
            return Err(ConfigError::InvalidAcceleration);
        }
        if !m.run_target_revs.is_finite() || m.run_target_revs == 0.0 {
            return Err(ConfigError::InvalidRunTarget);
        }
        Ok(())
    }

    fn all_pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.fet_pins
            .iter()
            .copied()
            .chain(self.hbridge_pins.iter().flat_map(|p| [p.a, p.b]))
            .chain([
                self.hbridge_power_pin,
                self.led_pin,
                self.motor.enable_pin,
                self.motor.step_pin,
                self.motor.dir_pin,
            ])
    }
}
