//! Point-in-time actuator state for reporting.
//!
//! Serialises to the stable status document consumed by the host:
//!
//! ```json
//! { "fet": [0, 0], "hbridge": [{ "state": "Forward", "power": 0 }], "led": false, "motor": 0 }
//! ```

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_BRIDGES, MAX_FETS};
use crate::drivers::hbridge::BridgeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeReport {
    pub state: BridgeState,
    pub power: u8,
}

/// Logical (un-inverted) state of every output, as last commanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorSnapshot {
    pub fet: Vec<u8, MAX_FETS>,
    pub hbridge: Vec<BridgeReport, MAX_BRIDGES>,
    pub led: bool,
    /// Commanded stepper speed (RPM).
    pub motor: u8,
}
