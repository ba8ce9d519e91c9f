//! `titanium init` — create a new, empty vault.

use crate::cli::output;
use crate::cli::{new_secret, seal_vault, vault_context, Cli, PASSWORD_ENV};
use crate::errors::{Result, TitaniumError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = vault_context(cli)?;

    // 1. Refuse to overwrite an existing vault.
    if ctx.store.exists() {
        output::tip("Use `titanium add` to add entries to the existing vault.");
        return Err(TitaniumError::VaultAlreadyExists(
            ctx.store.path().to_path_buf(),
        ));
    }

    // 2. Get the master secret (new password, or a hardware token).
    let secret = new_secret(cli.hardware_token.as_deref(), PASSWORD_ENV)?;

    // 3. Encrypt an empty vault and write it.
    seal_vault(&ctx, Vec::new(), &secret)?;

    if cli.hardware_token.is_some() {
        output::info("Vault sealed with a hardware token. Pass --hardware-token on every command.");
    }
    output::success(&format!("Vault created at {}", ctx.store.path().display()));

    let params = ctx.codec.params();
    output::tip(&format!(
        "Key derivation: argon2id, {} iterations, {} KiB, {} lanes",
        params.time_cost, params.memory_kib, params.parallelism
    ));
    output::tip("Run `titanium add <TITLE>` to add an entry.");

    Ok(())
}
