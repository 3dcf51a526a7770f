//! Fuzz target: `ActuatorCommand::from_json` → `handle_command`
//!
//! Feeds arbitrary bytes through the command decoder and applies whatever
//! decodes to a simulated controller.  Asserts it never panics, rejects
//! exactly the out-of-range indices, and leaves a snapshot that serialises.
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use actuators::adapters::sim::{SimHardware, SimStepper};
use actuators::config::ActuatorConfig;
use actuators::{ActuatorCommand, ActuatorController};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(mut ctrl) =
        ActuatorController::new(&ActuatorConfig::default(), SimHardware::new(), SimStepper::new())
    else {
        return;
    };

    for line in text.lines() {
        let Ok(cmd) = ActuatorCommand::from_json(line) else {
            continue;
        };
        let ok = ctrl.handle_command(cmd);
        match cmd {
            ActuatorCommand::ChangeFet { index, .. } => assert_eq!(ok, index < ctrl.fet_count()),
            ActuatorCommand::ChangeHbridge { index, .. } => {
                assert_eq!(ok, index < ctrl.hbridge_count());
            }
            _ => assert!(ok),
        }
    }

    assert!(ctrl.state_json().is_ok());
});
