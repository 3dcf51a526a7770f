//! Single PWM output with write suppression and pin re-binding.
//!
//! The channel caches the last *applied* duty.  A write only reaches the
//! [`PwmPort`] when the requested duty differs from that cache, or when the
//! cache is not trusted: a channel that has never been written, or one that
//! was just re-bound to another pin.

use log::debug;

use crate::app::ports::{PwmPort, PwmSlot};
use crate::pins::{PinId, PWM_RESOLUTION_BITS};

/// Full-scale duty shared by every channel.
pub const MAX_POWER: u8 = ((1u32 << PWM_RESOLUTION_BITS) - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmChannel {
    slot: PwmSlot,
    pin: PinId,
    power: u8,
    /// `power` is known to be on `pin` in hardware.
    applied: bool,
}

impl PwmChannel {
    /// Route `slot` to `pin`.  Power starts at 0 but is not yet applied, so
    /// the first [`set_power`](Self::set_power) always writes.
    pub fn attach(hw: &mut impl PwmPort, slot: PwmSlot, pin: PinId) -> Self {
        hw.attach(slot, pin);
        Self {
            slot,
            pin,
            power: 0,
            applied: false,
        }
    }

    /// Store `value` and write it if it is not already in effect.
    /// Returns whether the hardware was written.
    pub fn set_power(&mut self, hw: &mut impl PwmPort, value: u8) -> bool {
        if self.is_applied(value) {
            debug!("pwm slot {} pin {}: duty {} unchanged", self.slot, self.pin, value);
            return false;
        }
        hw.set_duty(self.slot, value);
        self.power = value;
        self.applied = true;
        true
    }

    /// Re-bind to `new_pin`.  The cached power is kept but marked stale so the
    /// next `set_power` re-asserts the duty on the new pin.
    pub fn reattach_pin(&mut self, hw: &mut impl PwmPort, new_pin: PinId) {
        hw.detach(self.slot, self.pin);
        hw.attach(self.slot, new_pin);
        self.pin = new_pin;
        self.applied = false;
    }

    /// Whether `value` is already the duty in effect on the current pin.
    pub fn is_applied(&self, value: u8) -> bool {
        self.applied && self.power == value
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn slot(&self) -> PwmSlot {
        self.slot
    }
}
