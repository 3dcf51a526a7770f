//! Command surface against the recording mock.

use actuators::config::ActuatorConfig;
use actuators::{ActuatorCommand, ActuatorController, BridgeReport, BridgeState, MAX_POWER};

use super::mock_hw::{HwCall, MockHardware, MockStepper, StepperCall};

type Ctrl = ActuatorController<MockHardware, MockStepper>;

fn make() -> (Ctrl, ActuatorConfig) {
    let cfg = ActuatorConfig::default();
    let c = ActuatorController::new(&cfg, MockHardware::new(), MockStepper::new()).unwrap();
    (c, cfg)
}

fn calls_since(c: &Ctrl, mark: usize) -> Vec<HwCall> {
    c.hardware().calls[mark..].to_vec()
}

// ── End-to-end scenario ───────────────────────────────────────

#[test]
fn reverse_bridge_changes_only_that_bridge() {
    let (mut c, _) = make();
    let before = c.snapshot();

    assert!(c.change_hbridge(0, BridgeState::Reverse, 128));

    let after = c.snapshot();
    assert_eq!(
        after.hbridge[0],
        BridgeReport {
            state: BridgeState::Reverse,
            power: 128
        }
    );
    assert_eq!(after.hbridge[1..], before.hbridge[1..]);
    assert_eq!(after.fet, before.fet);
    assert_eq!(after.led, before.led);
    assert_eq!(after.motor, before.motor);

    assert_eq!(
        c.state_json().unwrap(),
        r#"{"fet":[0,0,0,0],"hbridge":[{"state":"Reverse","power":128},{"state":"Forward","power":0}],"led":false,"motor":0}"#
    );
}

// ── Direction switch ──────────────────────────────────────────

#[test]
fn reattach_is_observed_before_new_duty() {
    let (mut c, cfg) = make();
    let slot = cfg.fet_pins.len() as u8;
    let legs = cfg.hbridge_pins[0];
    let mark = c.hardware().calls.len();

    c.change_hbridge(0, BridgeState::Reverse, 128);

    let calls = calls_since(&c, mark);
    let pos = |call| calls.iter().position(|c| *c == call).unwrap();
    let detach = pos(HwCall::Detach { slot, pin: legs.a });
    let attach = pos(HwCall::Attach { slot, pin: legs.b });
    let configured = pos(HwCall::ConfigureOutput(legs.a));
    let low = pos(HwCall::Write {
        pin: legs.a,
        high: false,
    });
    let duty = pos(HwCall::SetDuty { slot, duty: 128 });

    assert!(detach < attach);
    assert!(attach < duty);
    assert!(detach < configured && configured < low);
    assert!(low < duty);
}

#[test]
fn switching_back_to_forward_restores_leg_a() {
    let (mut c, cfg) = make();
    let slot = cfg.fet_pins.len() as u8;
    let legs = cfg.hbridge_pins[0];

    c.change_hbridge(0, BridgeState::Reverse, 90);
    c.change_hbridge(0, BridgeState::Forward, 90);

    let hw = c.hardware();
    assert_eq!(hw.routes[&slot], legs.a);
    assert_eq!(hw.duties[&slot], 90);
    assert_eq!(hw.levels[&legs.b], false);
    assert_eq!(c.snapshot().hbridge[0].state, BridgeState::Forward);
}

#[test]
fn same_power_new_direction_still_writes_duty() {
    let (mut c, _) = make();
    c.change_hbridge(1, BridgeState::Forward, 60);
    let mark = c.hardware().calls.len();

    c.change_hbridge(1, BridgeState::Reverse, 60);

    let calls = calls_since(&c, mark);
    assert!(calls.iter().any(|c| matches!(c, HwCall::SetDuty { duty: 60, .. })));
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_hbridge_command_writes_once() {
    let (mut c, _) = make();
    let mark = c.hardware().calls.len();

    assert!(c.change_hbridge(0, BridgeState::Reverse, 200));
    let first = c.hardware().calls.len();
    assert!(c.change_hbridge(0, BridgeState::Reverse, 200));

    assert_eq!(c.hardware().calls.len(), first, "second call must not touch hardware");
    let calls = calls_since(&c, mark);
    assert_eq!(calls.iter().filter(|c| matches!(c, HwCall::Attach { .. })).count(), 1);
    assert_eq!(calls.iter().filter(|c| matches!(c, HwCall::SetDuty { .. })).count(), 1);
}

#[test]
fn repeated_fet_command_writes_once() {
    let (mut c, _) = make();
    let before = c.hardware().duty_writes();
    c.change_fet(2, 33);
    c.change_fet(2, 33);
    assert_eq!(c.hardware().duty_writes(), before + 1);
    assert_eq!(c.hardware().duties[&2], MAX_POWER - 33);
}

#[test]
fn repeated_led_command_writes_once() {
    let (mut c, cfg) = make();
    let mark = c.hardware().calls.len();
    c.change_led(true);
    c.change_led(true);
    let writes = calls_since(&c, mark)
        .into_iter()
        .filter(|call| *call == HwCall::Write { pin: cfg.led_pin, high: true })
        .count();
    assert_eq!(writes, 1);
}

#[test]
fn repeated_motor_command_writes_once() {
    let (mut c, _) = make();
    let mark = c.hardware().calls.len();
    let speed_sets = c.stepper().speed_sets();

    c.change_motor(45);
    c.change_motor(45);

    assert_eq!(c.hardware().calls.len(), mark + 1, "enable line written once");
    assert_eq!(c.stepper().speed_sets(), speed_sets + 1);
    assert_eq!(c.stepper().starts(), 1);
}

// ── Motor ─────────────────────────────────────────────────────

#[test]
fn motor_service_is_edge_triggered() {
    let (mut c, cfg) = make();
    let base_speeds = c.stepper().speed_sets();

    c.change_motor(30);
    c.change_motor(60);
    assert_eq!(c.stepper().starts(), 1);
    assert_eq!(c.stepper().speed_sets(), base_speeds + 2);
    assert_eq!(c.hardware().levels[&cfg.motor.enable_pin], false);

    c.change_motor(0);
    assert_eq!(c.stepper().stops(), 1);
    assert_eq!(c.hardware().levels[&cfg.motor.enable_pin], true);
    assert_eq!(c.snapshot().motor, 0);
}

#[test]
fn motor_speed_is_sent_in_rev_per_second() {
    let (mut c, _) = make();
    c.change_motor(120);
    assert_eq!(c.stepper().calls.last(), Some(&StepperCall::Speed(2.0)));
    assert_eq!(c.snapshot().motor, 120);
}

#[test]
fn run_motor_sets_target_only() {
    let (mut c, cfg) = make();
    c.change_motor(60);
    let hw_mark = c.hardware().calls.len();
    let st_mark = c.stepper().calls.len();

    c.run_motor();

    assert_eq!(c.hardware().calls.len(), hw_mark);
    assert_eq!(
        &c.stepper().calls[st_mark..],
        &[StepperCall::TargetRelative(cfg.motor.run_target_revs)]
    );
    assert_eq!(c.snapshot().motor, 60);
}

// ── Range rejection ───────────────────────────────────────────

#[test]
fn out_of_range_indices_fail_without_side_effects() {
    let (mut c, _) = make();
    let snap = c.snapshot();
    let mark = c.hardware().calls.len();

    assert!(!c.change_fet(c.fet_count(), 1));
    assert!(!c.change_hbridge(c.hbridge_count(), BridgeState::Reverse, 1));

    assert_eq!(c.snapshot(), snap);
    assert_eq!(c.hardware().calls.len(), mark);
}

// ── Bridge bus ────────────────────────────────────────────────

#[test]
fn bridge_bus_is_written_unconditionally() {
    let (mut c, cfg) = make();
    let mark = c.hardware().calls.len();

    assert!(c.power_hbridge(true));
    assert!(c.power_hbridge(true));
    assert!(c.power_hbridge(false));

    let bus = cfg.hbridge_power_pin;
    assert_eq!(
        calls_since(&c, mark),
        vec![
            HwCall::Write { pin: bus, high: true },
            HwCall::Write { pin: bus, high: true },
            HwCall::Write { pin: bus, high: false },
        ]
    );
    assert!(!c.is_hbridge_powered());
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn json_commands_drive_the_controller() {
    let (mut c, _) = make();
    let script = [
        r#"{"cmd":"change_fet","index":3,"power":255}"#,
        r#"{"cmd":"change_hbridge","index":1,"state":"Reverse","power":10}"#,
        r#"{"cmd":"change_led","enabled":true}"#,
        r#"{"cmd":"change_motor","speed":30}"#,
        r#"{"cmd":"run_motor"}"#,
    ];
    for line in script {
        let cmd = ActuatorCommand::from_json(line).unwrap();
        assert!(c.handle_command(cmd), "{line} should succeed");
    }

    let snap = c.snapshot();
    assert_eq!(snap.fet[3], 255);
    assert_eq!(c.hardware().duties[&3], 0, "full logical power is hardware 0");
    assert_eq!(snap.hbridge[1].state, BridgeState::Reverse);
    assert!(snap.led);
    assert_eq!(snap.motor, 30);

    assert!(c.handle_command(ActuatorCommand::Shutdown));
    assert!(c.snapshot().fet.iter().all(|&p| p == 0));
}
