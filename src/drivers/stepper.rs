//! Stepper drive adapter.
//!
//! Turns a single speed command (RPM, 0 = stop) into calls on the external
//! motion service behind [`StepperPort`].  Stepping itself happens inside the
//! collaborator; this adapter only gates the driver, starts/stops the service
//! on enable edges, and forwards speed and targets.

use log::{debug, info};

use crate::app::ports::{PinPort, StepperPort};
use crate::config::MotorConfig;
use crate::drivers::binary_output::BinaryOutput;
use crate::drivers::polarity::Polarity;

/// Commanded stepper state.  `running` iff `speed > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepperState {
    /// RPM.
    pub speed: u8,
    pub running: bool,
}

pub struct StepperDriveAdapter<S> {
    stepper: S,
    enable: BinaryOutput,
    state: StepperState,
    speed_applied: bool,
    run_target_revs: f32,
}

/// RPM → revolutions per second.
pub fn rpm_to_rev_per_s(rpm: u8) -> f32 {
    f32::from(rpm) / 60.0
}

impl<S: StepperPort> StepperDriveAdapter<S> {
    /// Configure the enable line and hand wiring and motion parameters to the
    /// collaborator.  The motor is left stopped but not yet commanded.
    pub fn new(mut stepper: S, hw: &mut impl PinPort, cfg: &MotorConfig) -> Self {
        let enable = BinaryOutput::configure(hw, cfg.enable_pin, Polarity::ActiveLow);
        hw.configure_output(cfg.step_pin);
        hw.configure_output(cfg.dir_pin);

        stepper.connect(cfg.step_pin, cfg.dir_pin);
        stepper.set_steps_per_revolution(cfg.steps_per_revolution);
        stepper.set_acceleration(cfg.acceleration_rev_per_s2);

        Self {
            stepper,
            enable,
            state: StepperState::default(),
            speed_applied: false,
            run_target_revs: cfg.run_target_revs,
        }
    }

    /// Apply a speed in RPM.  Returns whether anything was written.
    ///
    /// The service is started or stopped only when the collaborator's service
    /// state disagrees with the request; the speed is forwarded on every change.
    pub fn set_speed(&mut self, hw: &mut impl PinPort, speed: u8) -> bool {
        let enabled = speed > 0;
        let mut touched = self.enable.set(hw, enabled);

        let service_running = self.stepper.is_service_running();
        if enabled && !service_running {
            self.stepper.start_service();
            info!("motor: service started");
            touched = true;
        } else if !enabled && service_running {
            self.stepper.stop_service();
            info!("motor: service stopped");
            touched = true;
        }
        self.state.running = enabled;

        if self.speed_applied && self.state.speed == speed {
            debug!("motor: speed {} unchanged", speed);
        } else {
            self.stepper.set_speed(rpm_to_rev_per_s(speed));
            self.state.speed = speed;
            self.speed_applied = true;
            touched = true;
        }
        touched
    }

    /// Issue the bounded relative-motion target.  Speed and enable state are
    /// untouched.
    pub fn run(&mut self) {
        self.stepper.set_target_relative(self.run_target_revs);
        info!("motor: run {} rev", self.run_target_revs);
    }

    pub fn state(&self) -> StepperState {
        self.state
    }

    /// Whether the collaborator reports its service as running.
    pub fn is_service_running(&self) -> bool {
        self.stepper.is_service_running()
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }
}
