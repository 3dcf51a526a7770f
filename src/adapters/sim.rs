//! In-memory hardware for host bring-up and unit tests.
//!
//! Tracks pin levels, PWM routing and duty registers, and counts writes so
//! callers can check write suppression.  No timing, no stepping.

use heapless::FnvIndexMap;
use log::debug;

use crate::app::ports::{PinPort, PwmPort, PwmSlot, StepperPort};
use crate::config::PWM_SLOTS;
use crate::pins::PinId;

/// Tracked GPIOs.  Power of two for `FnvIndexMap`.
const MAX_PINS: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
struct SlotState {
    pin: Option<PinId>,
    duty: u8,
}

/// Simulated GPIO + PWM peripheral.
#[derive(Debug, Default)]
pub struct SimHardware {
    levels: FnvIndexMap<PinId, bool, MAX_PINS>,
    outputs: FnvIndexMap<PinId, (), MAX_PINS>,
    slots: [SlotState; PWM_SLOTS],
    pin_writes: usize,
    duty_writes: usize,
    attaches: usize,
}

impl SimHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a duty register, as if left over from before reset.
    pub fn preset_duty(&mut self, slot: PwmSlot, duty: u8) {
        if let Some(s) = self.slots.get_mut(usize::from(slot)) {
            s.duty = duty;
        }
    }

    /// Seed a pin level, as if left over from before reset.
    pub fn preset_level(&mut self, pin: PinId, high: bool) {
        let _ = self.levels.insert(pin, high);
    }

    pub fn level(&self, pin: PinId) -> Option<bool> {
        self.levels.get(&pin).copied()
    }

    pub fn is_output(&self, pin: PinId) -> bool {
        self.outputs.contains_key(&pin)
    }

    pub fn routed_pin(&self, slot: PwmSlot) -> Option<PinId> {
        self.slots.get(usize::from(slot)).and_then(|s| s.pin)
    }

    pub fn pin_writes(&self) -> usize {
        self.pin_writes
    }

    pub fn duty_writes(&self) -> usize {
        self.duty_writes
    }

    pub fn attaches(&self) -> usize {
        self.attaches
    }
}

impl PinPort for SimHardware {
    fn configure_output(&mut self, pin: PinId) {
        let _ = self.outputs.insert(pin, ());
    }

    fn write(&mut self, pin: PinId, high: bool) {
        debug!("sim: gpio {} <- {}", pin, u8::from(high));
        let _ = self.levels.insert(pin, high);
        self.pin_writes += 1;
    }
}

impl PwmPort for SimHardware {
    fn attach(&mut self, slot: PwmSlot, pin: PinId) {
        if let Some(s) = self.slots.get_mut(usize::from(slot)) {
            s.pin = Some(pin);
            self.attaches += 1;
        }
    }

    fn detach(&mut self, slot: PwmSlot, pin: PinId) {
        if let Some(s) = self.slots.get_mut(usize::from(slot)) {
            if s.pin == Some(pin) {
                s.pin = None;
            }
        }
    }

    fn set_duty(&mut self, slot: PwmSlot, duty: u8) {
        debug!("sim: pwm slot {} <- {}", slot, duty);
        if let Some(s) = self.slots.get_mut(usize::from(slot)) {
            s.duty = duty;
            self.duty_writes += 1;
        }
    }

    fn duty(&self, slot: PwmSlot) -> u8 {
        self.slots.get(usize::from(slot)).map_or(0, |s| s.duty)
    }
}

// ── Stepper ───────────────────────────────────────────────────

/// Simulated motion service.  Records parameters and call counts.
#[derive(Debug, Default)]
pub struct SimStepper {
    pins: Option<(PinId, PinId)>,
    steps_per_revolution: u16,
    acceleration: f32,
    running: bool,
    speed: f32,
    target: f32,
    starts: usize,
    stops: usize,
    speed_sets: usize,
}

impl SimStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pins(&self) -> Option<(PinId, PinId)> {
        self.pins
    }

    pub fn steps_per_revolution(&self) -> u16 {
        self.steps_per_revolution
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    pub fn speed_sets(&self) -> usize {
        self.speed_sets
    }
}

impl StepperPort for SimStepper {
    fn connect(&mut self, step_pin: PinId, dir_pin: PinId) {
        self.pins = Some((step_pin, dir_pin));
    }

    fn set_steps_per_revolution(&mut self, steps: u16) {
        self.steps_per_revolution = steps;
    }

    fn set_acceleration(&mut self, rev_per_s2: f32) {
        self.acceleration = rev_per_s2;
    }

    fn start_service(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop_service(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn is_service_running(&self) -> bool {
        self.running
    }

    fn set_speed(&mut self, rev_per_s: f32) {
        self.speed = rev_per_s;
        self.speed_sets += 1;
    }

    fn set_target_relative(&mut self, revolutions: f32) {
        self.target += revolutions;
    }
}
