//! Display layouts for the 16×2 panel.
//!
//! Each function returns the frames for one screen in the order they are
//! written.

use crate::ledger::LedgerState;
use coinvault_common::coin::Denomination;
use coinvault_common::io::display::{Backlight, DisplayFrame};
use rust_decimal::Decimal;

/// Title shown on the main screen.
pub const TITLE: &str = "Coin Vault";

/// Dollar amount at (7, 1).
pub fn amount(total: Decimal) -> DisplayFrame {
    DisplayFrame::at(format!("${total}"), 7, 1)
}

/// Title and amount, green.
pub fn main_screen(total: Decimal) -> Vec<DisplayFrame> {
    vec![DisplayFrame::screen(TITLE, Backlight::Green), amount(total)]
}

/// Coin count over all bins, then one count per bin.
pub fn totals_screen(ledger: &LedgerState) -> Vec<DisplayFrame> {
    use Denomination::*;
    let bin = |d: Denomination, sep: &str| format!("{}:{sep}{}", d.short(), ledger.count(d));
    vec![
        DisplayFrame::screen(format!("Total:{}", ledger.coin_count()), Backlight::Green),
        DisplayFrame::at(bin(Quarter, " "), 10, 0),
        DisplayFrame::at(bin(Dime, ""), 0, 1),
        DisplayFrame::at(bin(Nickel, ""), 5, 1),
        DisplayFrame::at(bin(Penny, ""), 11, 1),
    ]
}

/// Prompt shown while accepting coins.
pub fn insert_screen(total: Decimal) -> Vec<DisplayFrame> {
    vec![
        DisplayFrame::screen("Please insert\ncoins", Backlight::Teal),
        amount(total),
    ]
}

/// Accepted coin and how many of it the bin will hold.
pub fn coin_screen(denomination: Denomination, count: u32, total: Decimal) -> Vec<DisplayFrame> {
    let (text, col) = match count {
        1 => ("1 coin".to_string(), 8),
        n if n < 100 => (format!("{n} coins"), 8),
        n => (format!("{n} coins"), 7),
    };
    vec![
        DisplayFrame::screen(denomination.tag(), Backlight::Violet),
        DisplayFrame::at(text, col, 0),
        amount(total),
    ]
}

/// Waiting for the fingerprint reader.
pub fn authenticate_screen() -> Vec<DisplayFrame> {
    vec![DisplayFrame::screen("Authenticate\nyourself", Backlight::Yellow)]
}

/// Fingerprint accepted.
pub fn opening_screen() -> Vec<DisplayFrame> {
    vec![DisplayFrame::screen(
        "AUTHENTICATED\nOpening Door...",
        Backlight::White,
    )]
}

/// Count of the bin under the feed while the door is open.
pub fn bin_count_screen(denomination: Denomination, count: u32) -> Vec<DisplayFrame> {
    let text = if count == 1 {
        format!("1 {}", denomination.tag())
    } else {
        format!("{count} {}", denomination.plural())
    };
    vec![
        DisplayFrame::screen("AUTHENTICATED", Backlight::White),
        DisplayFrame::at(text, 0, 1),
    ]
}

/// Door is being locked.
pub fn locking_screen() -> Vec<DisplayFrame> {
    vec![DisplayFrame::screen("Locking Door...", Backlight::Yellow)]
}

/// Red error text.
pub fn error_screen(message: &str) -> Vec<DisplayFrame> {
    vec![DisplayFrame::screen(message, Backlight::Red)]
}

/// Shown on an actuator fault.
pub const ACTUATOR_FAULT: &str = "Actuator fault\nor blocked";
/// Shown when the ledger cannot be written.
pub const WRITE_FAULT: &str = "Error writing\nledger";
/// Shown when the ledger cannot be read at startup.
pub const READ_FAULT: &str = "Error reading\nledger";
/// Shown on operator shutdown.
pub const GOOD_BYE: &str = "Good-bye!";
