//! Serial token classification.
//!
//! The coin acceptor prints the coin class somewhere in each line, possibly
//! wrapped in framing bytes, so matching is by substring. Lines that match
//! nothing are dropped by the caller.

use coinvault_common::coin::Denomination;

/// Phrase the fingerprint module prints on a successful scan.
pub const AUTH_OK_PHRASE: &str = "THE EAGLE HAS LANDED";

/// Denomination named in `token`, checked in ring order.
pub fn classify(token: &str) -> Option<Denomination> {
    Denomination::ALL
        .into_iter()
        .find(|d| token.contains(d.tag()))
}

/// True when `token` reports a successful fingerprint scan.
pub fn is_auth_ok(token: &str) -> bool {
    token.contains(AUTH_OK_PHRASE)
}
