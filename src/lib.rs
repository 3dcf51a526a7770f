//! Actuator control core.
//!
//! Owns the physical outputs of the board (FET channels, H-bridge motor
//! drivers, indicator LED, stepper drive), suppresses redundant writes, runs
//! the H-bridge direction-switch sequence and reports a state snapshot.
//! Hardware is reached only through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;

pub use app::commands::ActuatorCommand;
pub use app::controller::ActuatorController;
pub use app::snapshot::{ActuatorSnapshot, BridgeReport};
pub use drivers::hbridge::BridgeState;
pub use drivers::pwm_channel::MAX_POWER;
pub use error::{ActuatorError, ConfigError, Error, Result};
