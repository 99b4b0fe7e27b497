//! Recording collaborators shared by the integration tests.

use coinvault_common::hal::config::ActuatorConfig;
use coinvault_common::hal::driver::{ActuatorDriver, ActuatorFault};
use coinvault_common::hal::types::{ActuatorAction, Direction};
use coinvault_common::io::display::{Display, DisplayFrame};
use coinvault_common::io::panel::{Button, FrontPanel};
use coinvault_common::io::sensor::{LinkError, SensorCommand, SensorLink};
use coinvault_controller::BankController;
use coinvault_controller::ledger::PersistedLedger;
use std::collections::VecDeque;
use std::path::PathBuf;
use tempfile::TempDir;

// ── Actuators ───────────────────────────────────────────────────────

/// One successful actuator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Rotate(Direction, u8),
    Feed,
    Lock(bool),
    Release,
    Shutdown,
}

/// Records calls; fails every call of `fail_on` once armed.
#[derive(Debug, Default)]
pub struct RecordingActuators {
    pub calls: Vec<Call>,
    pub fail_on: Option<ActuatorAction>,
}

impl RecordingActuators {
    fn act(&mut self, action: Option<ActuatorAction>, call: Call) -> Result<(), ActuatorFault> {
        if let Some(action) = action.filter(|a| Some(*a) == self.fail_on) {
            return Err(ActuatorFault::NotAcknowledged {
                action,
                timeout_ms: 2000,
            });
        }
        self.calls.push(call);
        Ok(())
    }

    pub fn rotations(&self) -> Vec<(Direction, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Rotate(d, s) => Some((*d, *s)),
                _ => None,
            })
            .collect()
    }

    pub fn feeds(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Feed).count()
    }
}

impl ActuatorDriver for RecordingActuators {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn version(&self) -> &'static str {
        "0.0.0"
    }

    fn init(&mut self, _config: &ActuatorConfig) -> Result<(), ActuatorFault> {
        Ok(())
    }

    fn rotate(&mut self, direction: Direction, steps: u8) -> Result<(), ActuatorFault> {
        self.act(Some(ActuatorAction::Rotate), Call::Rotate(direction, steps))
    }

    fn feed_one_coin(&mut self) -> Result<(), ActuatorFault> {
        self.act(Some(ActuatorAction::Feed), Call::Feed)
    }

    fn set_lock(&mut self, engaged: bool) -> Result<(), ActuatorFault> {
        self.act(Some(ActuatorAction::Lock), Call::Lock(engaged))
    }

    fn release_rotation(&mut self) -> Result<(), ActuatorFault> {
        self.act(Some(ActuatorAction::Release), Call::Release)
    }

    fn shutdown(&mut self) -> Result<(), ActuatorFault> {
        self.act(None, Call::Shutdown)
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Keeps every frame.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<DisplayFrame>,
}

impl RecordingDisplay {
    /// Text of every frame, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.text.as_str()).collect()
    }

    /// Text of the frame that started the current screen.
    pub fn current_screen(&self) -> &str {
        self.frames
            .iter()
            .rev()
            .find(|f| f.clear)
            .map(|f| f.text.as_str())
            .unwrap_or("")
    }

    pub fn shown(&self, text: &str) -> bool {
        self.frames.iter().any(|f| f.text == text)
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, frame: DisplayFrame) {
        self.frames.push(frame);
    }
}

// ── Sensor link and panel ───────────────────────────────────────────

/// Serves queued lines and records what was sent.
#[derive(Debug, Default)]
pub struct ScriptedLink {
    pub incoming: VecDeque<String>,
    pub sent: Vec<SensorCommand>,
    pub flushes: usize,
    pub broken: bool,
}

impl SensorLink for ScriptedLink {
    fn read_line(&mut self) -> Result<Option<String>, LinkError> {
        if self.broken {
            return Err(LinkError::Io("device unplugged".to_string()));
        }
        Ok(self.incoming.pop_front())
    }

    fn send(&mut self, command: SensorCommand) -> Result<(), LinkError> {
        if self.broken {
            return Err(LinkError::Closed);
        }
        self.sent.push(command);
        Ok(())
    }

    fn flush_input(&mut self) {
        self.flushes += 1;
        self.incoming.clear();
    }
}

/// Serves queued presses.
#[derive(Debug, Default)]
pub struct ScriptedPanel {
    pub presses: VecDeque<Button>,
}

impl ScriptedPanel {
    pub fn new(presses: &[Button]) -> Self {
        Self {
            presses: presses.iter().copied().collect(),
        }
    }
}

impl FrontPanel for ScriptedPanel {
    fn poll_button(&mut self) -> Option<Button> {
        self.presses.pop_front()
    }
}

// ── Fixture ─────────────────────────────────────────────────────────

pub type TestController = BankController<RecordingActuators, RecordingDisplay, ScriptedLink>;

/// Temp directory holding one ledger file.
pub struct Vault {
    pub dir: TempDir,
}

impl Vault {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Vault whose ledger already holds `content`.
    pub fn with_ledger(content: &str) -> Self {
        let vault = Self::new();
        std::fs::write(vault.ledger_path(), content).unwrap();
        vault
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.path().join("data.txt")
    }

    pub fn ledger_text(&self) -> String {
        std::fs::read_to_string(self.ledger_path()).unwrap()
    }

    pub fn start(&self) -> TestController {
        self.start_with(RecordingActuators::default())
    }

    pub fn start_with(&self, actuators: RecordingActuators) -> TestController {
        self.start_parts(actuators, ScriptedLink::default())
    }

    pub fn start_parts(&self, actuators: RecordingActuators, link: ScriptedLink) -> TestController {
        BankController::start(
            PersistedLedger::new(self.ledger_path()),
            actuators,
            RecordingDisplay::default(),
            link,
        )
        .unwrap()
    }
}
