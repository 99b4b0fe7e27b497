//! The vault controller.
//!
//! `BankController` owns the ledger and the three collaborators (actuators,
//! display, sensor link) and is the only place faults are decided on. Every
//! event runs to completion: motion, ledger write and display all happen
//! before the next input is read.
//!
//! # Fault policy
//!
//! | Fault | Effect |
//! |-------|--------|
//! | actuator | error screen, best-effort save, `Halted` |
//! | ledger write | error screen, `Halted` |
//! | serial link | logged, input dropped |
//! | unrecognised serial line | logged at debug, dropped |
//! | serial line in Idle or Unlocked | left unread on the link |

use crate::classifier::{classify, is_auth_ok};
use crate::error::ControllerError;
use crate::ledger::{LedgerState, PersistedLedger};
use crate::position::{self, RotationPlan};
use crate::screens;
use crate::state::OperatingMode;
use crate::state::machine::{BankEvent, ModeMachine, TransitionResult};
use coinvault_common::coin::Denomination;
use coinvault_common::hal::driver::{ActuatorDriver, ActuatorFault};
use coinvault_common::hal::types::Direction;
use coinvault_common::io::display::{Display, DisplayFrame};
use coinvault_common::io::panel::{Button, FrontPanel};
use coinvault_common::io::sensor::{SensorCommand, SensorLink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What the control loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep polling.
    Continue,
    /// The operator shut the vault down.
    Shutdown,
}

/// Coin vault controller.
pub struct BankController<A, D, L> {
    store: PersistedLedger,
    ledger: LedgerState,
    machine: ModeMachine,
    actuators: A,
    display: D,
    link: L,
    last_plan: Option<RotationPlan>,
}

impl<A, D, L> BankController<A, D, L>
where
    A: ActuatorDriver,
    D: Display,
    L: SensorLink,
{
    /// Load the ledger, rewrite it if it was missing or malformed, and show
    /// the main screen.
    ///
    /// `actuators` must already be initialized.
    ///
    /// # Errors
    /// `ControllerError::Persistence` if the ledger exists but cannot be read,
    /// or cannot be rewritten. The matching error screen is shown first.
    pub fn start(
        store: PersistedLedger,
        actuators: A,
        mut display: D,
        link: L,
    ) -> Result<Self, ControllerError> {
        let load = match store.load() {
            Ok(load) => load,
            Err(e) => {
                error!("{}", e);
                for frame in screens::error_screen(screens::READ_FAULT) {
                    display.show(frame);
                }
                return Err(e.into());
            }
        };

        let mut controller = Self {
            store,
            ledger: load.state,
            machine: ModeMachine::new(),
            actuators,
            display,
            link,
            last_plan: None,
        };

        if load.dirty {
            info!("Rewriting ledger {:?}", controller.store.path());
            controller.persist()?;
        }

        controller.show(screens::main_screen(controller.ledger.total()));
        info!(
            "Controller ready: driver={} v{}, total=${}, position={}",
            controller.actuators.name(),
            controller.actuators.version(),
            controller.ledger.total(),
            controller.ledger.position()
        );
        Ok(controller)
    }

    /// Current mode.
    pub fn mode(&self) -> OperatingMode {
        self.machine.mode()
    }

    /// Current ledger.
    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    /// Most recent carousel move, if any.
    pub fn last_plan(&self) -> Option<RotationPlan> {
        self.last_plan
    }

    /// Actuator driver.
    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    /// Display collaborator.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Sensor link.
    pub fn link(&self) -> &L {
        &self.link
    }

    // ─── Inputs ─────────────────────────────────────────────────────

    /// Process one front panel press.
    pub fn handle_button(&mut self, button: Button) -> Result<Flow, ControllerError> {
        self.ensure_running()?;
        debug!("Button {} in {}", button.name(), self.mode());

        use Button::*;
        use OperatingMode::*;
        match (self.mode(), button) {
            (Idle, Select) => self.start_accepting(),
            (Idle, Left) => self.start_authentication(),
            (Idle, Right) => {
                self.shutdown()?;
                return Ok(Flow::Shutdown);
            }
            (Idle, Up) => self.show(screens::totals_screen(&self.ledger)),
            (Idle, Down) => self.show(screens::main_screen(self.ledger.total())),

            (Accepting, Right) => {
                self.persist()?;
                self.transition(BankEvent::Cancel);
                self.show(screens::main_screen(self.ledger.total()));
            }

            (Authenticating, Right) => {
                self.transition(BankEvent::Cancel);
                self.show(screens::main_screen(self.ledger.total()));
            }

            (Unlocked, Left) => self.rotate_next()?,
            (Unlocked, Up) => self.adjust_count(true)?,
            (Unlocked, Down) => self.adjust_count(false)?,
            (Unlocked, Right) => self.lock()?,

            (mode, button) => debug!("{} ignored in {}", button.name(), mode),
        }
        Ok(Flow::Continue)
    }

    /// Process one line from the sensor module.
    pub fn handle_serial(&mut self, line: &str) -> Result<Flow, ControllerError> {
        self.ensure_running()?;

        match self.mode() {
            OperatingMode::Accepting => match classify(line) {
                Some(denomination) => self.accept_coin(denomination)?,
                None => debug!("No coin in serial line {:?}", line),
            },
            OperatingMode::Authenticating => {
                if is_auth_ok(line) {
                    self.unlock()?;
                } else {
                    debug!("Serial line {:?} while authenticating", line);
                }
            }
            mode => debug!("Serial line {:?} dropped in {}", line, mode),
        }
        Ok(Flow::Continue)
    }

    /// One loop iteration: a pending button press, otherwise one serial line.
    ///
    /// The link is only read in modes that act on serial input. Lines that
    /// arrive in other modes stay buffered on the link until the vault starts
    /// accepting, or until authentication flushes them.
    pub fn poll_once<P>(&mut self, panel: &mut P) -> Result<Flow, ControllerError>
    where
        P: FrontPanel + ?Sized,
    {
        self.ensure_running()?;

        if let Some(button) = panel.poll_button() {
            return self.handle_button(button);
        }
        if !self.mode().listens_to_serial() {
            return Ok(Flow::Continue);
        }

        match self.link.read_line() {
            Ok(Some(line)) => self.handle_serial(&line),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                warn!("Sensor link: {}", e);
                Ok(Flow::Continue)
            }
        }
    }

    /// Poll until the operator shuts down, `running` is cleared, or a fault
    /// halts the controller.
    pub fn run<P>(
        &mut self,
        panel: &mut P,
        running: &AtomicBool,
        poll_interval: Duration,
    ) -> Result<(), ControllerError>
    where
        P: FrontPanel + ?Sized,
    {
        info!("Control loop started (poll interval {:?})", poll_interval);

        while running.load(Ordering::SeqCst) {
            if self.poll_once(panel)? == Flow::Shutdown {
                return Ok(());
            }
            if !poll_interval.is_zero() {
                std::thread::sleep(poll_interval);
            }
        }

        info!("Shutdown requested");
        self.shutdown()
    }

    /// Say good-bye, persist and stop the actuators.
    pub fn shutdown(&mut self) -> Result<(), ControllerError> {
        self.ensure_running()?;

        self.show(screens::error_screen(screens::GOOD_BYE));
        self.persist()?;
        if let Err(e) = self.actuators.shutdown() {
            warn!("Actuator shutdown failed: {}", e);
        }
        info!("Vault shut down with total ${}", self.ledger.total());
        Ok(())
    }

    // ─── Accepting ──────────────────────────────────────────────────

    fn start_accepting(&mut self) {
        self.transition(BankEvent::StartAccept);
        self.show(screens::insert_screen(self.ledger.total()));
    }

    fn accept_coin(&mut self, denomination: Denomination) -> Result<(), ControllerError> {
        let plan = position::plan(self.ledger.position(), denomination);
        self.last_plan = Some(plan);
        info!(
            "{} accepted: {} -> {}, {} x{}",
            denomination,
            self.ledger.position(),
            denomination,
            plan.direction,
            plan.steps
        );

        let mut after = self.ledger.clone();
        after.record_coin(denomination);
        self.show(screens::coin_screen(
            denomination,
            after.count(denomination),
            after.total(),
        ));

        if !plan.is_noop() {
            self.actuate(|a| a.rotate(plan.direction, plan.steps))?;
        }
        self.ledger.set_position(denomination);

        self.actuate(|a| a.feed_one_coin())?;
        self.ledger.record_coin(denomination);
        self.persist()?;
        self.transition(BankEvent::CoinAccepted);

        self.show(screens::insert_screen(self.ledger.total()));
        Ok(())
    }

    // ─── Authentication ─────────────────────────────────────────────

    fn start_authentication(&mut self) {
        self.transition(BankEvent::StartAuth);
        self.show(screens::authenticate_screen());
        self.link.flush_input();
        self.send(SensorCommand::RequestScan);
    }

    fn unlock(&mut self) -> Result<(), ControllerError> {
        info!("Authenticated, opening door");
        self.show(screens::opening_screen());
        self.link.flush_input();
        self.send(SensorCommand::DoorOpenAck);

        self.actuate(|a| a.set_lock(false))?;
        self.actuate(|a| a.release_rotation())?;
        self.transition(BankEvent::AuthSucceeded);
        self.show_bin_count();
        Ok(())
    }

    // ─── Unlocked ───────────────────────────────────────────────────

    fn rotate_next(&mut self) -> Result<(), ControllerError> {
        let plan = RotationPlan {
            direction: Direction::Clockwise,
            steps: 1,
        };
        self.last_plan = Some(plan);
        self.actuate(|a| a.rotate(plan.direction, plan.steps))?;

        let next = plan.apply(self.ledger.position());
        self.ledger.set_position(next);
        self.persist()?;
        self.transition(BankEvent::RotateNext);
        self.show_bin_count();

        self.actuate(|a| a.release_rotation())
    }

    fn adjust_count(&mut self, up: bool) -> Result<(), ControllerError> {
        let bin = self.ledger.position();
        if up {
            self.ledger.record_coin(bin);
        } else {
            self.ledger.remove_coin(bin);
        }
        info!("{} count adjusted to {}", bin, self.ledger.count(bin));

        self.persist()?;
        self.transition(BankEvent::AdjustCount);
        self.show_bin_count();
        Ok(())
    }

    fn lock(&mut self) -> Result<(), ControllerError> {
        self.persist()?;
        self.show(screens::locking_screen());
        self.actuate(|a| a.set_lock(true))?;
        self.transition(BankEvent::Lock);
        info!("Door locked");
        self.show(screens::main_screen(self.ledger.total()));
        Ok(())
    }

    // ─── Helpers ────────────────────────────────────────────────────

    fn ensure_running(&self) -> Result<(), ControllerError> {
        if self.machine.is_halted() {
            return Err(ControllerError::Halted);
        }
        Ok(())
    }

    fn transition(&mut self, event: BankEvent) {
        let from = self.machine.mode();
        match self.machine.handle_event(event) {
            TransitionResult::Ok(to) if to != from => info!("Mode {} -> {}", from, to),
            TransitionResult::Ok(_) => {}
            TransitionResult::Rejected(reason) => warn!("{:?} rejected: {}", event, reason),
        }
    }

    fn show(&mut self, frames: Vec<DisplayFrame>) {
        for frame in frames {
            self.display.show(frame);
        }
    }

    fn show_bin_count(&mut self) {
        let bin = self.ledger.position();
        self.show(screens::bin_count_screen(bin, self.ledger.count(bin)));
    }

    fn send(&mut self, command: SensorCommand) {
        if let Err(e) = self.link.send(command) {
            warn!("Failed to send {:?}: {}", command, e);
        }
    }

    /// Durable save. A failure halts the controller.
    fn persist(&mut self) -> Result<(), ControllerError> {
        match self.store.save(&self.ledger) {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("{}", e);
                self.show(screens::error_screen(screens::WRITE_FAULT));
                self.transition(BankEvent::Fault);
                Err(e.into())
            }
        }
    }

    /// Run one actuator action. A fault saves what is known and halts.
    fn actuate<F>(&mut self, action: F) -> Result<(), ControllerError>
    where
        F: FnOnce(&mut A) -> Result<(), ActuatorFault>,
    {
        match action(&mut self.actuators) {
            Ok(()) => Ok(()),
            Err(fault) => {
                error!("{}", fault);
                self.show(screens::error_screen(screens::ACTUATOR_FAULT));
                if let Err(e) = self.store.save(&self.ledger) {
                    error!("Best-effort save after actuator fault failed: {}", e);
                }
                self.transition(BankEvent::Fault);
                Err(fault.into())
            }
        }
    }
}
