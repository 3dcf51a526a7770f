//! Output polarity.
//!
//! FET gate drivers and the stepper enable line are active-low.  The
//! conversion lives here and nowhere else: drivers call [`Polarity::to_hardware`]
//! at the write boundary and [`Polarity::to_logical`] when reporting, so the
//! rest of the system reasons only in logical units.

use crate::drivers::pwm_channel::MAX_POWER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Logical power → hardware duty.
    ///
    /// Active-low: requested 0 maps to `MAX_POWER` (driver fully off) and
    /// `MAX_POWER` maps to 0 (driver fully on).
    pub const fn to_hardware(self, logical: u8) -> u8 {
        match self {
            Self::ActiveHigh => logical,
            Self::ActiveLow => MAX_POWER - logical,
        }
    }

    /// Hardware duty → logical power.  Inverse of [`to_hardware`](Self::to_hardware).
    pub const fn to_logical(self, hardware: u8) -> u8 {
        match self {
            Self::ActiveHigh => hardware,
            Self::ActiveLow => MAX_POWER - hardware,
        }
    }

    /// Electrical level for a logical on/off state.
    pub const fn level(self, enabled: bool) -> bool {
        match self {
            Self::ActiveHigh => enabled,
            Self::ActiveLow => !enabled,
        }
    }
}
