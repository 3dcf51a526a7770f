//! On/off digital output (indicator LED, bus enable, driver enable).

use log::debug;

use crate::app::ports::PinPort;
use crate::drivers::polarity::Polarity;
use crate::pins::PinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOutput {
    pin: PinId,
    polarity: Polarity,
    enabled: bool,
    applied: bool,
}

impl BinaryOutput {
    /// Configure `pin` as an output.  The logical state starts off but is not
    /// applied until the first [`set`](Self::set) or [`force`](Self::force).
    pub fn configure(hw: &mut impl PinPort, pin: PinId, polarity: Polarity) -> Self {
        hw.configure_output(pin);
        Self {
            pin,
            polarity,
            enabled: false,
            applied: false,
        }
    }

    /// Write `enabled` only if it differs from the applied state.
    /// Returns whether the pin was written.
    pub fn set(&mut self, hw: &mut impl PinPort, enabled: bool) -> bool {
        if self.applied && self.enabled == enabled {
            debug!("gpio {}: already {}", self.pin, enabled);
            return false;
        }
        self.force(hw, enabled);
        true
    }

    /// Write `enabled` unconditionally.
    pub fn force(&mut self, hw: &mut impl PinPort, enabled: bool) {
        hw.write(self.pin, self.polarity.level(enabled));
        self.enabled = enabled;
        self.applied = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }
}
