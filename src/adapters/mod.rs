//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter | Implements                       | Connects to                     |
//! |---------|----------------------------------|---------------------------------|
//! | `hal`   | PinPort, PwmPort                 | embedded-hal OutputPin / PWM    |
//! | `sim`   | PinPort, PwmPort, StepperPort    | In-memory registers (host/test) |

pub mod hal;
pub mod sim;
