//! `titanium import` — replace the vault with an exported envelope file.
//!
//! The file is always checked structurally (version, encodings, lengths).
//! With `--verify` it is also decrypted first, so a file that the current
//! secret cannot open is never stored.

use std::fs;
use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{decrypt_envelope, unlock_secret, vault_context, Cli};
use crate::errors::{Result, TitaniumError};
use crate::storage::import_envelope;
use crate::vault::Envelope;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str, verify: bool, force: bool) -> Result<()> {
    let ctx = vault_context(cli)?;
    let src = Path::new(file);

    if !src.exists() {
        return Err(TitaniumError::CommandFailed(format!(
            "file not found: {file}"
        )));
    }

    if verify {
        let contents = fs::read_to_string(src)?;
        let envelope = Envelope::from_json(&contents)?;
        let secret = unlock_secret(cli)?;
        let vault = decrypt_envelope(&ctx, envelope, &secret)?;
        output::info(&format!("Verified: file opens with {} entr(ies)", vault.len()));
    }

    if ctx.store.exists() && !force {
        let confirmed = Confirm::new()
            .with_prompt("Replace the existing vault?")
            .default(false)
            .interact()
            .map_err(|e| TitaniumError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(TitaniumError::UserCancelled);
        }
    }

    let envelope = import_envelope(&ctx.store, src)?;

    output::success(&format!(
        "Imported vault from {file} (format v{})",
        envelope.version
    ));
    Ok(())
}
