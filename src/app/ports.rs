//! Port traits: the boundary between actuator logic and hardware.
//!
//! ```text
//!   ActuatorController ──▶ PinPort / PwmPort / StepperPort ──▶ Adapter
//! ```
//!
//! Adapters (sim, embedded-hal, a test mock) implement these traits.  The
//! [`ActuatorController`](super::controller::ActuatorController) owns them
//! via generics, so channel logic never touches registers directly.
//!
//! All writes are fire-and-forget: no I/O failure mode is modelled at this
//! boundary.  An adapter that can fail logs and swallows the error.

use crate::pins::PinId;

/// Index of a PWM generator (timer/compare channel) that can be routed to
/// any PWM-capable pin.
pub type PwmSlot = u8;

// ───────────────────────────────────────────────────────────────
// Digital output port
// ───────────────────────────────────────────────────────────────

pub trait PinPort {
    /// Configure `pin` as a push-pull output.
    fn configure_output(&mut self, pin: PinId);

    /// Drive `pin` to the given electrical level.
    fn write(&mut self, pin: PinId, high: bool);
}

// ───────────────────────────────────────────────────────────────
// PWM port
// ───────────────────────────────────────────────────────────────

/// PWM generators with pin routing.
///
/// Duty is expressed on the shared full scale
/// [`MAX_POWER`](crate::drivers::pwm_channel::MAX_POWER).
pub trait PwmPort {
    /// Route `slot`'s output to `pin`.
    fn attach(&mut self, slot: PwmSlot, pin: PinId);

    /// Disconnect `slot` from `pin`.
    fn detach(&mut self, slot: PwmSlot, pin: PinId);

    /// Set `slot`'s duty.  Takes effect on whatever pin the slot is routed to.
    fn set_duty(&mut self, slot: PwmSlot, duty: u8);

    /// Current duty register value of `slot`.
    fn duty(&self, slot: PwmSlot) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Stepper motion-service port
// ───────────────────────────────────────────────────────────────

/// External stepper-motion collaborator.
///
/// Once started as a service it steps autonomously (timer/interrupt driven)
/// toward its target until stopped.  The core never generates steps itself.
pub trait StepperPort {
    fn connect(&mut self, step_pin: PinId, dir_pin: PinId);

    fn set_steps_per_revolution(&mut self, steps: u16);

    /// Acceleration in revolutions per second².
    fn set_acceleration(&mut self, rev_per_s2: f32);

    fn start_service(&mut self);

    fn stop_service(&mut self);

    fn is_service_running(&self) -> bool;

    /// Cruise speed in revolutions per second.
    fn set_speed(&mut self, rev_per_s: f32);

    /// Move `revolutions` relative to the current position.
    fn set_target_relative(&mut self, revolutions: f32);
}
