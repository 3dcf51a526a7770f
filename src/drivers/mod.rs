//! Output primitives: PWM channel, binary output, H-bridge, stepper drive.

pub mod binary_output;
pub mod hbridge;
pub mod polarity;
pub mod pwm_channel;
pub mod stepper;
