//! Fuzz target: `ActuatorConfig::from_json`
//!
//! Any config the loader accepts must bring a controller up cleanly.
//!
//! cargo fuzz run fuzz_config_loader

#![no_main]

use actuators::adapters::sim::{SimHardware, SimStepper};
use actuators::config::ActuatorConfig;
use actuators::ActuatorController;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(cfg) = ActuatorConfig::from_json(text) {
        let ctrl = ActuatorController::new(&cfg, SimHardware::new(), SimStepper::new())
            .expect("validated config must be accepted");
        assert!(ctrl.snapshot().fet.iter().all(|&p| p == 0));
    }
});
