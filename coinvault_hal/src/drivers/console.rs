//! Console front end.
//!
//! Terminal stand-ins for the 16×2 LCD plate, its five buttons and the serial
//! sensor module. One reader thread splits input lines into button presses
//! (`select`, `left`, `right`, `up`, `down`, optionally prefixed with `!`) and
//! serial lines; both halves share one ordered queue so a script replays in
//! the order it was written.
//!
//! The controller leaves the link unread in modes that ignore serial input.
//! When a serial line at the head of the queue survives a whole poll cycle,
//! the panel takes the next press from behind it and the skipped lines stay
//! queued, the way a UART buffers bytes nobody reads. Authentication flushes
//! those skipped lines.

use coinvault_common::io::display::{Backlight, DISPLAY_COLS, DISPLAY_ROWS, Display, DisplayFrame};
use coinvault_common::io::panel::{Button, FrontPanel};
use coinvault_common::io::sensor::{LinkError, SensorCommand, SensorLink};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// ─── Display ────────────────────────────────────────────────────────

/// Character display rendered as a framed text box on a writer.
pub struct ConsoleDisplay<W: Write> {
    cells: [[char; DISPLAY_COLS]; DISPLAY_ROWS],
    backlight: Backlight,
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    /// Blank display, backlight off.
    pub fn new(out: W) -> Self {
        Self {
            cells: [[' '; DISPLAY_COLS]; DISPLAY_ROWS],
            backlight: Backlight::Off,
            out,
        }
    }

    /// Current contents, one string per row.
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|row| row.iter().collect()).collect()
    }

    /// Current backlight.
    pub fn backlight(&self) -> Backlight {
        self.backlight
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn write_text(&mut self, text: &str, col: usize, row: usize) {
        let (mut col, mut row) = (col, row);
        for ch in text.chars() {
            if ch == '\n' {
                row += 1;
                col = 0;
                continue;
            }
            if row < DISPLAY_ROWS && col < DISPLAY_COLS {
                self.cells[row][col] = ch;
            }
            col += 1;
        }
    }

    fn render(&mut self) -> std::io::Result<()> {
        let border = "-".repeat(DISPLAY_COLS);
        writeln!(self.out, "+{border}+ [{:?}]", self.backlight)?;
        for row in self.rows() {
            writeln!(self.out, "|{row}|")?;
        }
        writeln!(self.out, "+{border}+")?;
        self.out.flush()
    }
}

impl<W: Write> Display for ConsoleDisplay<W> {
    fn show(&mut self, frame: DisplayFrame) {
        if frame.clear {
            self.cells = [[' '; DISPLAY_COLS]; DISPLAY_ROWS];
        }
        if let Some(backlight) = frame.backlight {
            self.backlight = backlight;
        }
        self.write_text(&frame.text, frame.col as usize, frame.row as usize);
        if let Err(e) = self.render() {
            debug!("Console display write failed: {}", e);
        }
    }
}

// ─── Input ──────────────────────────────────────────────────────────

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A front panel press.
    Button(Button),
    /// A line from the sensor module.
    Serial(String),
}

impl ConsoleEvent {
    /// Classify a raw input line.
    pub fn parse(line: &str) -> Self {
        match line.parse::<Button>() {
            Ok(button) => ConsoleEvent::Button(button),
            Err(()) => ConsoleEvent::Serial(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[derive(Default)]
struct QueueState {
    events: VecDeque<ConsoleEvent>,
    closed: bool,
    /// A serial line was at the head on the last panel poll.
    stalled: bool,
    /// Leading serial lines entered before the last press taken past them.
    deferred: usize,
}

/// Ordered event queue shared by the panel and link halves.
#[derive(Default)]
struct ConsoleQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl ConsoleQueue {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // A poisoned queue only means the reader thread panicked mid-push;
        // the data is still a valid VecDeque.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, event: ConsoleEvent) {
        self.lock().events.push_back(event);
        self.ready.notify_all();
    }

    fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }
}

/// Button half of the console front end.
pub struct ConsolePanel {
    queue: Arc<ConsoleQueue>,
    running: Arc<AtomicBool>,
}

impl FrontPanel for ConsolePanel {
    fn poll_button(&mut self) -> Option<Button> {
        let mut state = self.queue.lock();
        let next = state
            .events
            .iter()
            .position(|e| matches!(e, ConsoleEvent::Button(_)));

        match next {
            Some(0) => {
                state.stalled = false;
                match state.events.pop_front() {
                    Some(ConsoleEvent::Button(button)) => Some(button),
                    _ => None,
                }
            }
            Some(index) if state.stalled => {
                debug!("Link not read, taking press past {} serial lines", index);
                state.stalled = false;
                state.deferred = index;
                match state.events.remove(index) {
                    Some(ConsoleEvent::Button(button)) => Some(button),
                    _ => None,
                }
            }
            Some(_) => {
                state.stalled = true;
                None
            }
            None if state.closed && (state.events.is_empty() || state.stalled) => {
                // Input exhausted: ask the control loop to shut down.
                self.running.store(false, Ordering::SeqCst);
                None
            }
            None => {
                state.stalled = !state.events.is_empty();
                None
            }
        }
    }
}

/// Serial half of the console front end.
pub struct ConsoleLink {
    queue: Arc<ConsoleQueue>,
    read_timeout: Duration,
    sent: Vec<SensorCommand>,
}

impl ConsoleLink {
    /// Commands sent so far.
    pub fn sent(&self) -> &[SensorCommand] {
        &self.sent
    }
}

impl SensorLink for ConsoleLink {
    fn read_line(&mut self) -> Result<Option<String>, LinkError> {
        let deadline = Instant::now() + self.read_timeout;
        let mut state = self.queue.lock();
        loop {
            let serial_next = match state.events.front() {
                Some(ConsoleEvent::Serial(_)) => true,
                // A button is next in line; leave it for the panel.
                Some(ConsoleEvent::Button(_)) => return Ok(None),
                None => false,
            };
            if serial_next {
                if let Some(ConsoleEvent::Serial(line)) = state.events.pop_front() {
                    state.stalled = false;
                    state.deferred = state.deferred.saturating_sub(1);
                    return Ok(Some(line));
                }
            }
            if state.closed {
                return Ok(None);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            state = self
                .queue
                .ready
                .wait_timeout(state, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
    }

    fn send(&mut self, command: SensorCommand) -> Result<(), LinkError> {
        info!("-> sensor: '{}'", command.code() as char);
        self.sent.push(command);
        Ok(())
    }

    fn flush_input(&mut self) {
        // Only lines entered before the last press are stale.
        let mut state = self.queue.lock();
        let stale = state.deferred.min(state.events.len());
        state.events.drain(..stale);
        state.deferred = 0;
        debug!(
            "Console link flush: {} stale, {} events pending",
            stale,
            state.events.len()
        );
    }
}

/// Start the console reader thread on `input`.
///
/// End of input clears `running` once every queued line has been consumed.
pub fn spawn_console<R>(
    input: R,
    running: Arc<AtomicBool>,
    read_timeout: Duration,
) -> (ConsolePanel, ConsoleLink, JoinHandle<()>)
where
    R: BufRead + Send + 'static,
{
    let queue = Arc::new(ConsoleQueue::default());

    let reader_queue = Arc::clone(&queue);
    let handle = std::thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => reader_queue.push(ConsoleEvent::parse(&line)),
                Err(e) => {
                    warn!("Console input error: {}", e);
                    break;
                }
            }
        }
        reader_queue.close();
    });

    let panel = ConsolePanel {
        queue: Arc::clone(&queue),
        running,
    };
    let link = ConsoleLink {
        queue,
        read_timeout,
        sent: Vec::new(),
    };
    (panel, link, handle)
}
