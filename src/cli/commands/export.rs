//! `titanium export` — copy the encrypted vault to a file.
//!
//! The envelope is written as-is; nothing is decrypted, so no password is
//! needed.

use std::path::Path;

use crate::cli::output;
use crate::cli::{vault_context, Cli};
use crate::errors::{Result, TitaniumError};
use crate::storage::export_envelope;

/// Execute the `export` command.
pub fn execute(cli: &Cli, dest: &str) -> Result<()> {
    let ctx = vault_context(cli)?;
    let dest_path = Path::new(dest);

    // Safety: refuse to export over the live vault.
    if dest_path == ctx.store.path() {
        return Err(TitaniumError::CommandFailed(
            "refusing to export over the vault file itself".into(),
        ));
    }

    if !ctx.store.exists() {
        return Err(TitaniumError::VaultNotFound(ctx.store.path().to_path_buf()));
    }

    export_envelope(&ctx.store, dest_path)?;

    output::success(&format!("Exported encrypted vault to {dest}"));
    Ok(())
}
