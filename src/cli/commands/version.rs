//! `titanium version` — display version and envelope format information.

use console::style;

use crate::crypto::ARGON2ID;
use crate::errors::Result;
use crate::vault::CURRENT_VERSION;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("titanium {current}");
    println!(
        "{} envelope v{CURRENT_VERSION}, {ARGON2ID} + aes-256-gcm",
        style("format:").dim()
    );
    Ok(())
}
