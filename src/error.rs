//! Unified error types for the actuator core.
//!
//! A single `Error` enum that every subsystem can convert into.  All variants
//! are `Copy` so they can be passed through command dispatch without
//! allocation.

use core::fmt;

use crate::pins::PinId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An actuator command was rejected.
    Actuator(ActuatorError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

/// The only failure the command surface models: a channel index outside the
/// configured device count.  Pin writes are treated as infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    FetIndexOutOfRange { index: usize, count: usize },
    BridgeIndexOutOfRange { index: usize, count: usize },
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetIndexOutOfRange { index, count } => {
                write!(f, "FET index {index} out of range (count={count})")
            }
            Self::BridgeIndexOutOfRange { index, count } => {
                write!(f, "H-bridge index {index} out of range (count={count})")
            }
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Config JSON could not be deserialized (bad syntax, wrong types, or a
    /// collection larger than its fixed capacity).
    Malformed,
    /// The same GPIO is assigned to more than one output.
    DuplicatePin(PinId),
    /// An H-bridge routes both legs to the same GPIO.
    BridgeLegsShared { index: usize },
    /// FETs plus H-bridges need more PWM slots than the hardware has.
    PwmSlotsExhausted { needed: usize, available: usize },
    /// Steps per revolution must be non-zero.
    ZeroStepsPerRevolution,
    /// Acceleration must be finite and positive.
    InvalidAcceleration,
    /// Run target must be finite and non-zero.
    InvalidRunTarget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config"),
            Self::DuplicatePin(pin) => write!(f, "GPIO {pin} assigned more than once"),
            Self::BridgeLegsShared { index } => {
                write!(f, "H-bridge {index} uses the same GPIO for both legs")
            }
            Self::PwmSlotsExhausted { needed, available } => {
                write!(f, "{needed} PWM slots needed, {available} available")
            }
            Self::ZeroStepsPerRevolution => write!(f, "steps per revolution is zero"),
            Self::InvalidAcceleration => write!(f, "acceleration must be positive"),
            Self::InvalidRunTarget => write!(f, "run target must be non-zero"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
