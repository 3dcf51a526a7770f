//! Inbound commands to the actuator controller.
//!
//! These mirror the imperative command surface one-to-one so a host
//! dispatcher (serial, RPC) can decode a JSON request and hand it to
//! [`ActuatorController::handle_command`](super::controller::ActuatorController::handle_command).
//!
//! ```json
//! {"cmd":"change_hbridge","index":0,"state":"Reverse","power":128}
//! ```

use serde::{Deserialize, Serialize};

use crate::drivers::hbridge::BridgeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ActuatorCommand {
    /// Set a FET channel's logical power (0 = off).
    ChangeFet { index: usize, power: u8 },

    /// Set an H-bridge channel's direction and power.
    ChangeHbridge {
        index: usize,
        state: BridgeState,
        power: u8,
    },

    ChangeLed { enabled: bool },

    /// Stepper speed in RPM; 0 stops the motion service.
    ChangeMotor { speed: u8 },

    /// Issue the configured relative-motion target.
    RunMotor,

    /// Switch the shared H-bridge power bus.
    PowerHbridge { enabled: bool },

    /// Drive every output to its safe off state.
    Shutdown,
}

impl ActuatorCommand {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
