//! Integration test: controller driving the simulation driver.
//!
//! Validates that the carousel model ends up under the bin the ledger
//! records, and that injected faults surface as a halt.

use super::support::{RecordingDisplay, ScriptedLink, Vault};
use coinvault_common::coin::Denomination;
use coinvault_common::hal::config::ActuatorConfig;
use coinvault_common::hal::driver::ActuatorDriver;
use coinvault_common::hal::types::ActuatorAction;
use coinvault_common::io::panel::Button;
use coinvault_controller::ledger::PersistedLedger;
use coinvault_controller::state::OperatingMode;
use coinvault_controller::{BankController, ControllerError};
use coinvault_hal::DriverRegistry;
use coinvault_hal::drivers::simulation::SimulationDriver;

fn simulated(config: &ActuatorConfig) -> SimulationDriver {
    let mut driver = SimulationDriver::new();
    driver.init(config).unwrap();
    driver
}

fn start(
    vault: &Vault,
    driver: SimulationDriver,
) -> BankController<SimulationDriver, RecordingDisplay, ScriptedLink> {
    BankController::start(
        PersistedLedger::new(vault.ledger_path()),
        driver,
        RecordingDisplay::default(),
        ScriptedLink::default(),
    )
    .unwrap()
}

#[test]
fn carousel_tracks_ledger_position() {
    let vault = Vault::new();
    let mut vc = start(&vault, simulated(&ActuatorConfig::instant()));
    vc.handle_button(Button::Select).unwrap();

    for token in ["DIME", "PENNY", "NICKEL", "QUARTER", "NICKEL", "DIME"] {
        vc.handle_serial(token).unwrap();
        let mechanics = vc.actuators().mechanics().unwrap();
        assert_eq!(
            mechanics.slot(90),
            vc.ledger().position().index(),
            "after {token}"
        );
    }

    let mechanics = vc.actuators().mechanics().unwrap();
    assert_eq!(mechanics.coins_fed(), 6);
    assert_eq!(vc.ledger().position(), Denomination::Dime);
}

#[test]
fn unlock_and_lock_drive_the_bolt() {
    let vault = Vault::new();
    let mut vc = start(&vault, simulated(&ActuatorConfig::instant()));

    vc.handle_button(Button::Left).unwrap();
    vc.handle_serial("THE EAGLE HAS LANDED").unwrap();
    let mechanics = vc.actuators().mechanics().unwrap();
    assert!(!mechanics.is_locked());
    assert!(mechanics.is_free_spinning());

    vc.handle_button(Button::Right).unwrap();
    assert!(vc.actuators().mechanics().unwrap().is_locked());
    assert_eq!(vc.mode(), OperatingMode::Idle);
}

#[test]
fn injected_feed_fault_halts() {
    let mut config = ActuatorConfig::instant();
    config.simulation.fail_action = Some(ActuatorAction::Feed);
    config.simulation.fail_after = 1;

    let vault = Vault::new();
    let mut vc = start(&vault, simulated(&config));
    vc.handle_button(Button::Select).unwrap();

    vc.handle_serial("PENNY").unwrap();
    assert!(matches!(
        vc.handle_serial("PENNY"),
        Err(ControllerError::Actuator(_))
    ));
    assert_eq!(vc.mode(), OperatingMode::Halted);
    assert_eq!(vault.ledger_text(), "0.01\nPENNY\n0\n0\n0\n1");
}

#[test]
fn registry_builds_the_simulation_driver() {
    let registry = DriverRegistry::with_builtin();
    let mut driver = registry.create_driver("simulation").unwrap();
    driver.init(&ActuatorConfig::instant()).unwrap();

    let vault = Vault::new();
    let mut vc = BankController::start(
        PersistedLedger::new(vault.ledger_path()),
        driver,
        RecordingDisplay::default(),
        ScriptedLink::default(),
    )
    .unwrap();
    vc.handle_button(Button::Select).unwrap();
    vc.handle_serial("NICKEL").unwrap();
    assert_eq!(vc.ledger().count(Denomination::Nickel), 1);
}
