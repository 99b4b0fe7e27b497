//! # Coin Vault Binary
//!
//! Runs the vault controller against the console front end: stdin lines are
//! button presses (`select`, `left`, `right`, `up`, `down`) or sensor module
//! lines, and the 16×2 display is printed to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: simulation driver, ./data.txt
//! coinvault
//!
//! # With a config file and a different ledger
//! coinvault --config config/coinvault.toml --ledger /tmp/vault.txt
//!
//! # Scripted session
//! printf 'select\nDIME\nright\nright\n' | coinvault -v
//! ```

#![deny(warnings)]

use clap::Parser;
use coinvault_common::config::{ConfigError, LogLevel, VaultConfig, load_vault_config};
use coinvault_common::hal::driver::ActuatorDriver;
use coinvault_common::io::display::Display;
use coinvault_controller::BankController;
use coinvault_controller::ledger::PersistedLedger;
use coinvault_controller::screens;
use coinvault_hal::DriverRegistry;
use coinvault_hal::drivers::console::{ConsoleDisplay, spawn_console};
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Coin Vault - coin-sorting safe controller
#[derive(Parser, Debug)]
#[command(name = "coinvault")]
#[command(version)]
#[command(about = "Coin-sorting safe controller with a console front end")]
#[command(long_about = None)]
struct Args {
    /// Path to the vault configuration file (coinvault.toml).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ledger file, overrides `[ledger] path`.
    #[arg(short, long, value_name = "FILE")]
    ledger: Option<PathBuf>,

    /// Actuator driver, overrides `[actuators] driver`.
    #[arg(short, long)]
    driver: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Coin vault stopped: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args);
    setup_tracing(&args, config.as_ref().map(|c| c.shared.log_level).ok());
    let config = config?.with_overrides(args.ledger.clone(), args.driver.clone())?;

    info!(
        "Coin vault v{} starting as {:?}",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    let mut display = ConsoleDisplay::new(std::io::stdout());

    let registry = DriverRegistry::with_builtin();
    info!("Available drivers: {:?}", registry.list_drivers());
    let mut driver = registry.create_driver(&config.actuators.driver)?;
    if let Err(e) = driver.init(&config.actuators) {
        for frame in screens::error_screen(screens::ACTUATOR_FAULT) {
            display.show(frame);
        }
        return Err(e.into());
    }
    info!("Driver {} v{} initialized", driver.name(), driver.version());

    let running = Arc::new(AtomicBool::new(true));
    let signal = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        signal.store(false, Ordering::SeqCst);
    })?;

    let (mut panel, link, _reader) = spawn_console(
        BufReader::new(std::io::stdin()),
        Arc::clone(&running),
        config.sensor.read_timeout(),
    );

    let store = PersistedLedger::new(&config.ledger.path);
    let mut controller = BankController::start(store, driver, display, link)?;
    controller.run(&mut panel, &running, config.panel.poll_interval())?;

    info!("Coin vault shutdown complete");
    Ok(())
}

fn load_config(args: &Args) -> Result<VaultConfig, ConfigError> {
    match &args.config {
        Some(path) => load_vault_config(path),
        None => Ok(VaultConfig::default()),
    }
}

/// Setup tracing subscriber from the CLI flags and the configured level.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured.unwrap_or_default()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
