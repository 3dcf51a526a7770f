//! Controller construction: initialize → shutdown → bridge bus on.

use actuators::app::ports::StepperPort;
use actuators::config::ActuatorConfig;
use actuators::{ActuatorController, BridgeState, MAX_POWER};

use super::mock_hw::{HwCall, MockHardware, MockStepper, StepperCall};

fn all_output_pins(cfg: &ActuatorConfig) -> Vec<u8> {
    let mut pins: Vec<u8> = cfg.fet_pins.iter().copied().collect();
    for p in &cfg.hbridge_pins {
        pins.push(p.a);
        pins.push(p.b);
    }
    pins.extend([cfg.hbridge_power_pin, cfg.led_pin, cfg.motor.enable_pin]);
    pins
}

#[test]
fn energised_hardware_is_forced_off_at_startup() {
    let cfg = ActuatorConfig::default();
    let slots = cfg.pwm_slots_needed() as u8;
    let hw = MockHardware::energised(slots, &all_output_pins(&cfg));

    let c = ActuatorController::new(&cfg, hw, MockStepper::new()).unwrap();
    let hw = c.hardware();

    let fets = cfg.fet_pins.len() as u8;
    for slot in 0..fets {
        assert_eq!(hw.duties[&slot], MAX_POWER, "FET slot {slot} must be driven off");
    }
    for slot in fets..slots {
        assert_eq!(hw.duties[&slot], 0, "bridge slot {slot} must be at zero");
    }
    for pair in &cfg.hbridge_pins {
        assert_eq!(hw.levels[&pair.b], false, "reverse leg must be held low");
    }
    assert_eq!(hw.levels[&cfg.led_pin], false);
    // Active-low enable: HIGH keeps the stepper driver off.
    assert_eq!(hw.levels[&cfg.motor.enable_pin], true);
    assert_eq!(hw.levels[&cfg.hbridge_power_pin], true);

    let snap = c.snapshot();
    assert!(snap.fet.iter().all(|&p| p == 0));
    assert!(snap
        .hbridge
        .iter()
        .all(|b| b.state == BridgeState::Forward && b.power == 0));
    assert!(!snap.led);
    assert_eq!(snap.motor, 0);
}

#[test]
fn bridge_bus_is_cycled_off_then_on_after_shutdown() {
    let cfg = ActuatorConfig::default();
    let c = ActuatorController::new(&cfg, MockHardware::new(), MockStepper::new()).unwrap();
    let hw = c.hardware();
    let bus = cfg.hbridge_power_pin;

    let off = hw
        .position(HwCall::Write { pin: bus, high: false })
        .expect("bus must be disabled during init");
    let on = hw
        .position(HwCall::Write { pin: bus, high: true })
        .expect("bus must be enabled at the end of startup");
    assert!(off < on);

    let last_duty = hw
        .calls
        .iter()
        .rposition(|c| matches!(c, HwCall::SetDuty { .. }))
        .unwrap();
    assert!(last_duty < on, "bus comes up only after every channel is at zero");
}

#[test]
fn channels_attach_to_forward_leg_on_their_own_slot() {
    let cfg = ActuatorConfig::default();
    let c = ActuatorController::new(&cfg, MockHardware::new(), MockStepper::new()).unwrap();
    let hw = c.hardware();

    for (i, &pin) in cfg.fet_pins.iter().enumerate() {
        assert_eq!(hw.routes[&(i as u8)], pin);
    }
    let base = cfg.fet_pins.len();
    for (i, pair) in cfg.hbridge_pins.iter().enumerate() {
        assert_eq!(hw.routes[&((base + i) as u8)], pair.a);
    }
}

#[test]
fn stepper_is_configured_and_left_stopped() {
    let cfg = ActuatorConfig::default();
    let c = ActuatorController::new(&cfg, MockHardware::new(), MockStepper::new()).unwrap();
    let st = c.stepper();

    assert_eq!(
        &st.calls[..3],
        &[
            StepperCall::Connect {
                step: cfg.motor.step_pin,
                dir: cfg.motor.dir_pin
            },
            StepperCall::StepsPerRevolution(cfg.motor.steps_per_revolution),
            StepperCall::Acceleration(cfg.motor.acceleration_rev_per_s2),
        ]
    );
    assert_eq!(st.starts(), 0);
    assert_eq!(st.stops(), 0);
    assert_eq!(st.speed_sets(), 1);
}

#[test]
fn leftover_motion_service_is_stopped_at_startup() {
    let cfg = ActuatorConfig::default();
    let c = ActuatorController::new(&cfg, MockHardware::new(), MockStepper::already_running())
        .unwrap();
    let st = c.stepper();

    assert_eq!(st.stops(), 1);
    assert_eq!(st.starts(), 0);
    assert!(!st.is_service_running());
    assert_eq!(c.snapshot().motor, 0);
    assert_eq!(c.hardware().levels[&cfg.motor.enable_pin], true);
}
