//! `titanium delete` — remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{find_entry, open_vault, seal_vault, unlock_secret, vault_context, Cli};
use crate::errors::{Result, TitaniumError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id_or_title: &str, force: bool) -> Result<()> {
    let ctx = vault_context(cli)?;
    let secret = unlock_secret(cli)?;
    let mut vault = open_vault(&ctx, &secret)?;

    let idx = find_entry(&vault, id_or_title)?;
    let title = vault[idx].title.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| TitaniumError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.remove(idx);
    seal_vault(&ctx, vault, &secret)?;

    output::success(&format!("Deleted entry '{title}'"));
    Ok(())
}
