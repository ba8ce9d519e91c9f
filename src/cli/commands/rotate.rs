//! `titanium rotate-password` — change the vault master secret.
//!
//! Decrypts the vault with the current secret and re-encrypts it with the
//! new one.  Re-encryption draws a fresh salt and nonce and uses the KDF
//! costs from the current settings, so rotating also upgrades an old
//! vault to today's defaults.

use crate::cli::output;
use crate::cli::{
    new_secret, open_vault, seal_vault, unlock_secret, vault_context, Cli, NEW_PASSWORD_ENV,
};
use crate::errors::Result;

/// Execute the `rotate-password` command.
pub fn execute(cli: &Cli, new_hardware_token: Option<&str>) -> Result<()> {
    let ctx = vault_context(cli)?;
    let old_params = ctx.store.load_existing()?.kdf_params();

    // 1. Open the vault with the current secret.
    output::info("Unlock the vault with your current secret.");
    let old_secret = unlock_secret(cli)?;
    let vault = open_vault(&ctx, &old_secret)?;
    drop(old_secret);

    // 2. Get the new secret.
    if new_hardware_token.is_none() {
        output::info("Choose your new master password.");
    }
    let new_secret = new_secret(new_hardware_token, NEW_PASSWORD_ENV)?;

    // 3. Re-encrypt and save atomically.
    let count = vault.len();
    seal_vault(&ctx, vault, &new_secret)?;

    output::success(&format!(
        "Master secret rotated ({count} entries re-encrypted)"
    ));

    let new_params = ctx.codec.params();
    if *new_params != old_params {
        output::tip(&format!(
            "Key derivation upgraded: {} -> {} iterations, {} -> {} KiB, {} -> {} lanes",
            old_params.time_cost,
            new_params.time_cost,
            old_params.memory_kib,
            new_params.memory_kib,
            old_params.parallelism,
            new_params.parallelism
        ));
    }

    Ok(())
}
