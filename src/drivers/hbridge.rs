//! H-bridge motor channel.
//!
//! One PWM drive signal, routed to leg A for forward or leg B for reverse.
//! The channel holds a single [`PwmChannel`] binding, so there is no state in
//! which both legs carry the drive signal.
//!
//! ## Direction switch
//!
//! Changing direction re-routes the drive *before* the new duty is written:
//!
//! ```text
//!   detach(old leg) ─▶ attach(new leg) ─▶ old leg LOW ─▶ set_duty(power)
//! ```
//!
//! Both steps always run together; a transition is never half-applied.

use core::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::app::ports::{PinPort, PwmPort, PwmSlot};
use crate::config::BridgePins;
use crate::drivers::pwm_channel::PwmChannel;
use crate::pins::PinId;

/// Drive direction.  Serialises as `"Forward"` / `"Reverse"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeState {
    #[default]
    Forward,
    Reverse,
}

impl BridgeState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Reverse => "Reverse",
        }
    }

    /// Lenient label parse: `"Forward"` is forward, anything else reverse.
    pub fn from_label(label: &str) -> Self {
        if label == "Forward" {
            Self::Forward
        } else {
            Self::Reverse
        }
    }
}

impl core::fmt::Display for BridgeState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BridgeState {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HBridgeChannel {
    legs: BridgePins,
    direction: BridgeState,
    drive: PwmChannel,
}

impl HBridgeChannel {
    /// Bind the drive to leg A (forward) and hold leg B low.
    pub fn new(hw: &mut (impl PinPort + PwmPort), slot: PwmSlot, legs: BridgePins) -> Self {
        let drive = PwmChannel::attach(hw, slot, legs.a);
        hw.configure_output(legs.b);
        hw.write(legs.b, false);
        Self {
            legs,
            direction: BridgeState::Forward,
            drive,
        }
    }

    /// Apply `(direction, power)`.  Returns whether any hardware was touched;
    /// `false` means the request was already in effect.
    pub fn apply(
        &mut self,
        hw: &mut (impl PinPort + PwmPort),
        direction: BridgeState,
        power: u8,
    ) -> bool {
        if self.direction == direction && self.drive.is_applied(power) {
            return false;
        }

        if self.direction != direction {
            let released = self.leg(self.direction);
            let driven = self.leg(direction);
            self.drive.reattach_pin(hw, driven);
            hw.configure_output(released);
            hw.write(released, false);
            info!(
                "hbridge slot {}: {} -> {} (pin {} -> {})",
                self.drive.slot(),
                self.direction,
                direction,
                released,
                driven
            );
        }

        self.direction = direction;
        self.drive.set_power(hw, power);
        true
    }

    /// Leg that carries the drive for `direction`.
    pub fn leg(&self, direction: BridgeState) -> PinId {
        match direction {
            BridgeState::Forward => self.legs.a,
            BridgeState::Reverse => self.legs.b,
        }
    }

    pub fn direction(&self) -> BridgeState {
        self.direction
    }

    pub fn power(&self) -> u8 {
        self.drive.power()
    }

    /// Pin currently carrying the drive signal.
    pub fn driven_pin(&self) -> PinId {
        self.drive.pin()
    }
}
