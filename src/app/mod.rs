//! Application core: actuator state and command surface, zero direct I/O.
//!
//! All interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod controller;
pub mod ports;
pub mod snapshot;
