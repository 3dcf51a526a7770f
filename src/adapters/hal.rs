//! embedded-hal adapter: maps the pin and PWM ports onto HAL drivers.
//!
//! Digital outputs are `embedded_hal::digital::OutputPin`s keyed by GPIO.
//! Every PWM-capable pin is its own `embedded_hal::pwm::SetDutyCycle`
//! channel; slot attach/detach is emulated with a slot → pin routing table.
//! Detaching drops the old pin to 0 %; an attached pin carries no signal
//! until the slot's next duty write.
//!
//! HAL errors are logged and swallowed: the actuator core treats writes as
//! infallible.

use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::{PinPort, PwmPort, PwmSlot};
use crate::config::PWM_SLOTS;
use crate::drivers::pwm_channel::MAX_POWER;
use crate::pins::PinId;

pub const MAX_OUTPUTS: usize = 16;
pub const MAX_PWM_PINS: usize = 16;

pub struct HalHardware<P, C> {
    outputs: Vec<(PinId, P), MAX_OUTPUTS>,
    pwm_pins: Vec<(PinId, C), MAX_PWM_PINS>,
    routes: [Option<PinId>; PWM_SLOTS],
    duties: [u8; PWM_SLOTS],
}

impl<P: OutputPin, C: SetDutyCycle> HalHardware<P, C> {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
            pwm_pins: Vec::new(),
            routes: [None; PWM_SLOTS],
            duties: [0; PWM_SLOTS],
        }
    }

    /// Register a digital output.  Hands the pin back when the table is full.
    pub fn add_output(&mut self, id: PinId, pin: P) -> Result<(), P> {
        self.outputs.push((id, pin)).map_err(|(_, pin)| pin)
    }

    /// Register a PWM-capable pin.  Hands the channel back when the table is full.
    pub fn add_pwm_pin(&mut self, id: PinId, channel: C) -> Result<(), C> {
        self.pwm_pins.push((id, channel)).map_err(|(_, ch)| ch)
    }

    fn output_mut(&mut self, id: PinId) -> Option<&mut P> {
        self.outputs
            .iter_mut()
            .find(|(pin, _)| *pin == id)
            .map(|(_, p)| p)
    }

    fn pwm_pin_mut(&mut self, id: PinId) -> Option<&mut C> {
        self.pwm_pins
            .iter_mut()
            .find(|(pin, _)| *pin == id)
            .map(|(_, c)| c)
    }

    fn drive_pwm_pin(&mut self, id: PinId, duty: u8) {
        let Some(ch) = self.pwm_pin_mut(id) else {
            warn!("hal: gpio {} is not PWM capable", id);
            return;
        };
        if let Err(e) = ch.set_duty_cycle_fraction(u16::from(duty), u16::from(MAX_POWER)) {
            warn!("hal: pwm on gpio {} failed: {:?}", id, e.kind());
        }
    }

    fn route(&self, slot: PwmSlot) -> Option<PinId> {
        self.routes.get(usize::from(slot)).copied().flatten()
    }
}

impl<P: OutputPin, C: SetDutyCycle> Default for HalHardware<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, C: SetDutyCycle> PinPort for HalHardware<P, C> {
    fn configure_output(&mut self, pin: PinId) {
        // HAL pins are output-typed at construction.
        debug!("hal: gpio {} configured as output", pin);
    }

    fn write(&mut self, pin: PinId, high: bool) {
        if let Some(out) = self.output_mut(pin) {
            let res = if high { out.set_high() } else { out.set_low() };
            if let Err(e) = res {
                warn!("hal: gpio {} write failed: {:?}", pin, e.kind());
            }
            return;
        }
        // A PWM leg not currently routed is held static through its channel.
        if self.routes.contains(&Some(pin)) {
            warn!("hal: gpio {} is carrying PWM, level write ignored", pin);
            return;
        }
        self.drive_pwm_pin(pin, if high { MAX_POWER } else { 0 });
    }
}

impl<P: OutputPin, C: SetDutyCycle> PwmPort for HalHardware<P, C> {
    fn attach(&mut self, slot: PwmSlot, pin: PinId) {
        let idx = usize::from(slot);
        if idx >= PWM_SLOTS {
            warn!("hal: pwm slot {} out of range", slot);
            return;
        }
        // The new pin stays static until the next `set_duty`.
        self.routes[idx] = Some(pin);
    }

    fn detach(&mut self, slot: PwmSlot, pin: PinId) {
        if self.route(slot) == Some(pin) {
            self.routes[usize::from(slot)] = None;
            self.drive_pwm_pin(pin, 0);
        }
    }

    fn set_duty(&mut self, slot: PwmSlot, duty: u8) {
        let Some(d) = self.duties.get_mut(usize::from(slot)) else {
            warn!("hal: pwm slot {} out of range", slot);
            return;
        };
        *d = duty;
        if let Some(pin) = self.route(slot) {
            self.drive_pwm_pin(pin, duty);
        }
    }

    fn duty(&self, slot: PwmSlot) -> u8 {
        self.duties.get(usize::from(slot)).copied().unwrap_or(0)
    }
}
