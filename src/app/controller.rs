//! Actuator controller: sole owner of every physical output.
//!
//! [`ActuatorController`] owns the hardware ports, the FET and H-bridge
//! channels, the LED, the bridge power bus and the stepper drive.  Every
//! command runs to completion synchronously; nothing else writes the
//! outputs, so no locking is needed.
//!
//! ```text
//!   command ──▶ index check ──▶ channel ──▶ write if changed ──▶ cached state
//!   snapshot ◀── cached state (no hardware reads)
//! ```
//!
//! ## Startup
//!
//! [`new`](ActuatorController::new) runs `initialize` → `shutdown` →
//! bridge bus on.  Every channel starts with an untrusted cache, so shutdown
//! rewrites each output regardless of what the hardware held at power-on.

use heapless::Vec;
use log::{info, warn};
use serde_json::{Map, Value};

use crate::app::commands::ActuatorCommand;
use crate::app::ports::{PinPort, PwmPort, PwmSlot, StepperPort};
use crate::app::snapshot::{ActuatorSnapshot, BridgeReport};
use crate::config::{ActuatorConfig, MAX_BRIDGES, MAX_FETS};
use crate::drivers::binary_output::BinaryOutput;
use crate::drivers::hbridge::{BridgeState, HBridgeChannel};
use crate::drivers::polarity::Polarity;
use crate::drivers::pwm_channel::PwmChannel;
use crate::drivers::stepper::StepperDriveAdapter;
use crate::error::{ActuatorError, ConfigError};

/// FET gate drivers conduct on a LOW signal.
const FET_POLARITY: Polarity = Polarity::ActiveLow;

pub struct ActuatorController<H, S> {
    hw: H,
    fets: Vec<PwmChannel, MAX_FETS>,
    bridges: Vec<HBridgeChannel, MAX_BRIDGES>,
    bridge_power: BinaryOutput,
    led: BinaryOutput,
    motor: StepperDriveAdapter<S>,
}

impl<H, S> ActuatorController<H, S>
where
    H: PinPort + PwmPort,
    S: StepperPort,
{
    /// Validate `config`, bring every output to its safe state and power the
    /// H-bridge bus.
    pub fn new(config: &ActuatorConfig, hw: H, stepper: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut ctrl = Self::initialize(config, hw, stepper);
        if !ctrl.shutdown() {
            warn!("actuators: startup shutdown reported a failure");
        }
        ctrl.power_hbridge(true);
        info!(
            "actuators: ready ({} FET, {} H-bridge)",
            ctrl.fet_count(),
            ctrl.hbridge_count()
        );
        Ok(ctrl)
    }

    /// Parse a JSON board config and bring the controller up with it.
    pub fn from_json_config(json: &str, hw: H, stepper: S) -> crate::error::Result<Self> {
        let config = ActuatorConfig::from_json(json)?;
        Ok(Self::new(&config, hw, stepper)?)
    }

    /// Configure pins and build device objects: FETs on slots `0..n`, bridges
    /// on the following slots with leg A attached, bus held off.
    fn initialize(config: &ActuatorConfig, mut hw: H, stepper: S) -> Self {
        let motor = StepperDriveAdapter::new(stepper, &mut hw, &config.motor);

        let mut slot: PwmSlot = 0;
        let mut fets = Vec::new();
        for &pin in &config.fet_pins {
            // Capacities match the config's own fixed-capacity vectors.
            let _ = fets.push(PwmChannel::attach(&mut hw, slot, pin));
            slot += 1;
        }

        let mut bridges = Vec::new();
        for &legs in &config.hbridge_pins {
            let _ = bridges.push(HBridgeChannel::new(&mut hw, slot, legs));
            slot += 1;
        }

        let mut bridge_power =
            BinaryOutput::configure(&mut hw, config.hbridge_power_pin, Polarity::ActiveHigh);
        bridge_power.force(&mut hw, false);

        let led = BinaryOutput::configure(&mut hw, config.led_pin, Polarity::ActiveHigh);

        info!("actuators: initialized {} PWM slots", slot);
        Self {
            hw,
            fets,
            bridges,
            bridge_power,
            led,
            motor,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every FET to 0, every bridge to Forward/0, the LED off and the
    /// motor to a stop.
    ///
    /// Every step runs even if an earlier one failed; the result is the AND
    /// of all steps.
    pub fn shutdown(&mut self) -> bool {
        let mut result = true;

        for i in 0..self.fets.len() {
            result &= self.change_fet(i, 0);
        }
        for i in 0..self.bridges.len() {
            result &= self.change_hbridge(i, BridgeState::Forward, 0);
        }
        result &= self.change_led(false);
        result &= self.change_motor(0);

        info!("actuators: shutdown complete (ok={})", result);
        result
    }

    // ── Commands ──────────────────────────────────────────────

    pub fn try_change_fet(&mut self, index: usize, power: u8) -> Result<(), ActuatorError> {
        let count = self.fets.len();
        let ch = self
            .fets
            .get_mut(index)
            .ok_or(ActuatorError::FetIndexOutOfRange { index, count })?;

        if ch.set_power(&mut self.hw, FET_POLARITY.to_hardware(power)) {
            info!("fet {}: power {}", index, power);
        }
        Ok(())
    }

    /// Set FET `index` to logical `power`.  `false` if the index is out of range.
    pub fn change_fet(&mut self, index: usize, power: u8) -> bool {
        report(self.try_change_fet(index, power))
    }

    pub fn try_change_hbridge(
        &mut self,
        index: usize,
        state: BridgeState,
        power: u8,
    ) -> Result<(), ActuatorError> {
        let count = self.bridges.len();
        let bridge = self
            .bridges
            .get_mut(index)
            .ok_or(ActuatorError::BridgeIndexOutOfRange { index, count })?;

        let old_power = bridge.power();
        if bridge.apply(&mut self.hw, state, power) {
            info!(
                "hbridge {}: {} old_power {} power {}",
                index, state, old_power, power
            );
        }
        Ok(())
    }

    /// Set H-bridge `index` to `(state, power)`.  `false` if the index is out of range.
    pub fn change_hbridge(&mut self, index: usize, state: BridgeState, power: u8) -> bool {
        report(self.try_change_hbridge(index, state, power))
    }

    pub fn change_led(&mut self, enabled: bool) -> bool {
        if self.led.set(&mut self.hw, enabled) {
            info!("led: {}", if enabled { "on" } else { "off" });
        }
        true
    }

    /// Set stepper speed in RPM; 0 stops it.
    pub fn change_motor(&mut self, speed: u8) -> bool {
        if self.motor.set_speed(&mut self.hw, speed) {
            info!("motor: speed {} rpm", speed);
        }
        true
    }

    pub fn run_motor(&mut self) {
        if !self.motor.state().running {
            warn!("motor: run requested while stopped");
        }
        self.motor.run();
    }

    /// Switch the shared H-bridge power bus.  Always written.
    pub fn power_hbridge(&mut self, enabled: bool) -> bool {
        self.bridge_power.force(&mut self.hw, enabled);
        info!("hbridge bus: {}", if enabled { "on" } else { "off" });
        true
    }

    /// Dispatch a decoded command.  Returns the command's success flag.
    pub fn handle_command(&mut self, cmd: ActuatorCommand) -> bool {
        match cmd {
            ActuatorCommand::ChangeFet { index, power } => self.change_fet(index, power),
            ActuatorCommand::ChangeHbridge {
                index,
                state,
                power,
            } => self.change_hbridge(index, state, power),
            ActuatorCommand::ChangeLed { enabled } => self.change_led(enabled),
            ActuatorCommand::ChangeMotor { speed } => self.change_motor(speed),
            ActuatorCommand::RunMotor => {
                self.run_motor();
                true
            }
            ActuatorCommand::PowerHbridge { enabled } => self.power_hbridge(enabled),
            ActuatorCommand::Shutdown => self.shutdown(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last applied state of every output, in logical units.
    pub fn snapshot(&self) -> ActuatorSnapshot {
        let mut fet = Vec::new();
        for ch in &self.fets {
            let _ = fet.push(FET_POLARITY.to_logical(ch.power()));
        }
        let mut hbridge = Vec::new();
        for br in &self.bridges {
            let _ = hbridge.push(BridgeReport {
                state: br.direction(),
                power: br.power(),
            });
        }

        ActuatorSnapshot {
            fet,
            hbridge,
            led: self.led.is_enabled(),
            motor: self.motor.state().speed,
        }
    }

    /// Populate `state` with the `fet`, `hbridge`, `led` and `motor` keys.
    /// Other keys already in the document are left alone.
    pub fn serialize_state(&self, state: &mut Map<String, Value>) -> serde_json::Result<()> {
        let snap = self.snapshot();
        state.insert("fet".into(), serde_json::to_value(&snap.fet)?);
        state.insert("hbridge".into(), serde_json::to_value(&snap.hbridge)?);
        state.insert("led".into(), Value::Bool(snap.led));
        state.insert("motor".into(), Value::from(snap.motor));
        Ok(())
    }

    pub fn state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn fet_count(&self) -> usize {
        self.fets.len()
    }

    pub fn hbridge_count(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_hbridge_powered(&self) -> bool {
        self.bridge_power.is_enabled()
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn stepper(&self) -> &S {
        self.motor.stepper()
    }
}

fn report(result: Result<(), ActuatorError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("actuators: {}", e);
            false
        }
    }
}
