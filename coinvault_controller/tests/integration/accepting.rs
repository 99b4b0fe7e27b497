//! Integration test: coin acceptance.
//!
//! Validates carousel routing, ledger updates on disk, and the fault path
//! when the feed motor stops acknowledging.

use super::support::{Call, RecordingActuators, ScriptedLink, ScriptedPanel, Vault};
use coinvault_common::coin::Denomination;
use coinvault_common::hal::driver::ActuatorFault;
use coinvault_common::hal::types::{ActuatorAction, Direction};
use coinvault_common::io::panel::Button;
use coinvault_controller::position::RotationPlan;
use coinvault_controller::state::OperatingMode;
use coinvault_controller::{ControllerError, Flow};
use rust_decimal::Decimal;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

const CW1: RotationPlan = RotationPlan {
    direction: Direction::Clockwise,
    steps: 1,
};
const CW2: RotationPlan = RotationPlan {
    direction: Direction::Clockwise,
    steps: 2,
};

#[test]
fn dime_dime_penny_session() {
    let vault = Vault::new();
    let mut vc = vault.start();
    assert_eq!(vc.ledger().position(), Denomination::Quarter);

    vc.handle_button(Button::Select).unwrap();
    assert_eq!(vc.mode(), OperatingMode::Accepting);

    let mut plans = Vec::new();
    for token in ["DIME", "DIME", "PENNY"] {
        assert_eq!(vc.handle_serial(token).unwrap(), Flow::Continue);
        plans.push(vc.last_plan().unwrap());
    }

    assert_eq!(plans, [CW1, RotationPlan::STAY, CW2]);
    assert_eq!(vc.ledger().position(), Denomination::Penny);
    assert_eq!(vc.ledger().counts(), [0, 2, 0, 1]);
    assert_eq!(vc.ledger().total(), Decimal::new(21, 2));
    assert_eq!(vc.mode(), OperatingMode::Accepting);

    assert_eq!(
        vc.actuators().rotations(),
        [(Direction::Clockwise, 1), (Direction::Clockwise, 2)]
    );
    assert_eq!(vc.actuators().feeds(), 3);
    assert_eq!(vault.ledger_text(), "0.21\nPENNY\n0\n2\n0\n1");
}

#[test]
fn rotation_precedes_feed() {
    let vault = Vault::new();
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("NICKEL").unwrap();

    assert_eq!(
        vc.actuators().calls,
        [Call::Rotate(Direction::Clockwise, 2), Call::Feed]
    );
}

#[test]
fn counter_clockwise_for_previous_bin() {
    let vault = Vault::with_ledger("0.00\nDIME\n0\n0\n0\n0");
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("QUARTER").unwrap();

    assert_eq!(
        vc.actuators().rotations(),
        [(Direction::CounterClockwise, 1)]
    );
    assert_eq!(vault.ledger_text(), "0.25\nQUARTER\n1\n0\n0\n0");
}

#[test]
fn coin_screen_then_insert_prompt() {
    let vault = Vault::new();
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("DIME").unwrap();

    let texts = vc.display().texts();
    let coin = texts.iter().position(|t| *t == "DIME").unwrap();
    assert_eq!(texts[coin + 1], "1 coin");
    assert_eq!(texts[coin + 2], "$0.10");
    assert_eq!(vc.display().current_screen(), "Please insert\ncoins");
    assert_eq!(texts.last(), Some(&"$0.10"));
}

#[test]
fn framing_bytes_are_tolerated() {
    let vault = Vault::new();
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("\u{2}xxPENNYxx\r").unwrap();
    assert_eq!(vc.ledger().count(Denomination::Penny), 1);
}

#[test]
fn unrecognised_lines_are_dropped() {
    let vault = Vault::new();
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();

    for line in ["", "garbage", "dime", "THE EAGLE HAS LANDED"] {
        assert_eq!(vc.handle_serial(line).unwrap(), Flow::Continue);
    }
    assert!(vc.actuators().calls.is_empty());
    assert_eq!(vc.ledger().coin_count(), 0);
    assert_eq!(vc.mode(), OperatingMode::Accepting);
}

#[test]
fn coins_ignored_outside_accepting() {
    let vault = Vault::new();
    let mut vc = vault.start();

    vc.handle_serial("QUARTER").unwrap();
    assert!(vc.actuators().calls.is_empty());
    assert_eq!(vc.ledger().coin_count(), 0);
}

#[test]
fn cancel_returns_to_main_screen() {
    let vault = Vault::new();
    let mut vc = vault.start();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("QUARTER").unwrap();
    vc.handle_button(Button::Right).unwrap();

    assert_eq!(vc.mode(), OperatingMode::Idle);
    assert_eq!(vc.display().current_screen(), "Coin Vault");
    assert_eq!(vc.display().texts().last(), Some(&"$0.25"));
    assert_eq!(vault.ledger_text(), "0.25\nQUARTER\n1\n0\n0\n0");
}

#[test]
fn feed_fault_halts_with_previous_count() {
    let vault = Vault::new();
    let mut vc = vault.start_with(RecordingActuators {
        fail_on: Some(ActuatorAction::Feed),
        ..Default::default()
    });
    vc.handle_button(Button::Select).unwrap();

    let err = vc.handle_serial("DIME").unwrap_err();
    assert_eq!(
        err,
        ControllerError::Actuator(ActuatorFault::NotAcknowledged {
            action: ActuatorAction::Feed,
            timeout_ms: 2000,
        })
    );
    assert_eq!(vc.mode(), OperatingMode::Halted);
    assert_eq!(vc.display().current_screen(), "Actuator fault\nor blocked");

    // The carousel did turn, so the position moved; the coin was not counted.
    assert_eq!(vault.ledger_text(), "0.00\nDIME\n0\n0\n0\n0");

    assert_eq!(vc.handle_serial("DIME"), Err(ControllerError::Halted));
    assert_eq!(vc.handle_button(Button::Right), Err(ControllerError::Halted));
    assert_eq!(vc.ledger().coin_count(), 0);
    assert_eq!(vault.ledger_text(), "0.00\nDIME\n0\n0\n0\n0");
}

#[test]
fn rotate_fault_keeps_position() {
    let vault = Vault::new();
    let mut vc = vault.start_with(RecordingActuators {
        fail_on: Some(ActuatorAction::Rotate),
        ..Default::default()
    });
    vc.handle_button(Button::Select).unwrap();

    assert!(matches!(
        vc.handle_serial("NICKEL"),
        Err(ControllerError::Actuator(_))
    ));
    assert_eq!(vc.actuators().feeds(), 0);
    assert_eq!(vault.ledger_text(), "0.00\nQUARTER\n0\n0\n0\n0");
}

#[test]
fn ledger_write_fault_halts() {
    let vault = Vault::new();
    let mut vc = vault.start();
    // A directory where the temp file should go makes every save fail.
    std::fs::create_dir(vault.dir.path().join("data.txt.tmp")).unwrap();

    vc.handle_button(Button::Select).unwrap();
    assert!(matches!(
        vc.handle_serial("PENNY"),
        Err(ControllerError::Persistence(_))
    ));
    assert_eq!(vc.mode(), OperatingMode::Halted);
    assert_eq!(vc.display().current_screen(), "Error writing\nledger");
}

#[test]
fn poll_prefers_buttons_then_reads_serial() {
    let vault = Vault::new();
    let link = ScriptedLink {
        incoming: ["QUARTER".to_string()].into(),
        ..Default::default()
    };
    let mut vc = vault.start_parts(RecordingActuators::default(), link);
    let mut panel = ScriptedPanel::new(&[Button::Select]);

    vc.poll_once(&mut panel).unwrap();
    assert_eq!(vc.mode(), OperatingMode::Accepting);
    assert_eq!(vc.ledger().coin_count(), 0);

    vc.poll_once(&mut panel).unwrap();
    assert_eq!(vc.ledger().count(Denomination::Quarter), 1);
    assert!(vc.actuators().rotations().is_empty());
}

#[test]
fn coin_reported_on_main_screen_is_counted_after_select() {
    let vault = Vault::new();
    let link = ScriptedLink {
        incoming: ["DIME".to_string()].into(),
        ..Default::default()
    };
    let mut vc = vault.start_parts(RecordingActuators::default(), link);
    let mut panel = ScriptedPanel::default();

    // Idle: the line stays on the link.
    vc.poll_once(&mut panel).unwrap();
    assert_eq!(vc.link().incoming.len(), 1);
    assert_eq!(vc.ledger().coin_count(), 0);

    panel.presses.push_back(Button::Select);
    vc.poll_once(&mut panel).unwrap();
    vc.poll_once(&mut panel).unwrap();

    assert_eq!(vc.ledger().count(Denomination::Dime), 1);
    assert_eq!(vc.actuators().rotations(), [(Direction::Clockwise, 1)]);
    assert_eq!(vault.ledger_text(), "0.10\nDIME\n0\n1\n0\n0");
}

#[test]
fn coin_reported_on_main_screen_is_flushed_by_authentication() {
    let vault = Vault::new();
    let link = ScriptedLink {
        incoming: ["QUARTER".to_string()].into(),
        ..Default::default()
    };
    let mut vc = vault.start_parts(RecordingActuators::default(), link);
    let mut panel = ScriptedPanel::default();

    vc.poll_once(&mut panel).unwrap();
    panel.presses.extend([Button::Left, Button::Right, Button::Select]);
    for _ in 0..4 {
        vc.poll_once(&mut panel).unwrap();
    }

    assert_eq!(vc.mode(), OperatingMode::Accepting);
    assert_eq!(vc.ledger().coin_count(), 0);
}

#[test]
fn broken_link_is_not_fatal() {
    let vault = Vault::new();
    let link = ScriptedLink {
        broken: true,
        ..Default::default()
    };
    let mut vc = vault.start_parts(RecordingActuators::default(), link);
    let mut panel = ScriptedPanel::new(&[Button::Select]);

    vc.poll_once(&mut panel).unwrap();
    assert_eq!(vc.poll_once(&mut panel).unwrap(), Flow::Continue);
    assert_eq!(vc.mode(), OperatingMode::Accepting);
}

#[test]
fn run_until_operator_shutdown() {
    let vault = Vault::new();
    let link = ScriptedLink {
        incoming: ["DIME".to_string()].into(),
        ..Default::default()
    };
    let mut vc = vault.start_parts(RecordingActuators::default(), link);
    // Select, (serial DIME), cancel, shut down.
    let mut panel = ScriptedPanel::new(&[Button::Select]);
    let running = AtomicBool::new(true);

    // First pass: Select, then the DIME line, then nothing left.
    for _ in 0..3 {
        vc.poll_once(&mut panel).unwrap();
    }
    panel.presses.extend([Button::Right, Button::Right]);
    vc.run(&mut panel, &running, Duration::ZERO).unwrap();

    assert_eq!(vc.mode(), OperatingMode::Idle);
    assert_eq!(vc.display().current_screen(), "Good-bye!");
    assert_eq!(vc.actuators().calls.last(), Some(&Call::Shutdown));
    assert_eq!(vault.ledger_text(), "0.10\nDIME\n0\n1\n0\n0");
}

#[test]
fn cleared_flag_shuts_down() {
    let vault = Vault::new();
    let mut vc = vault.start();
    let mut panel = ScriptedPanel::default();
    let running = AtomicBool::new(false);

    vc.run(&mut panel, &running, Duration::ZERO).unwrap();
    assert!(vc.display().shown("Good-bye!"));
    assert_eq!(vc.actuators().calls, [Call::Shutdown]);
}
