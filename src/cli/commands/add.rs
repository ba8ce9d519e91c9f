//! `titanium add` — add a credential entry.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, seal_vault, unlock_secret, vault_context, Cli};
use crate::errors::{Result, TitaniumError};
use crate::vault::VaultEntry;

/// Environment variable holding the entry password (scripting).
pub const ENTRY_PASSWORD_ENV: &str = "TITANIUM_ENTRY_PASSWORD";

/// Fields of the entry being added, as given on the command line.
pub struct NewEntry<'a> {
    pub title: &'a str,
    pub username: &'a str,
    pub url: &'a str,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: &'a [String],
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, new: NewEntry<'_>) -> Result<()> {
    let ctx = vault_context(cli)?;

    // Open the vault first so a wrong master password fails fast.
    let secret = unlock_secret(cli)?;
    let mut vault = open_vault(&ctx, &secret)?;

    let password = prompt_entry_password(new.title)?;

    let mut entry = VaultEntry::new(new.title, new.username, password.as_str(), new.url);
    if let Some(notes) = new.notes {
        entry = entry.with_notes(notes);
    }
    if let Some(category) = new.category {
        entry = entry.with_category(category);
    }
    if !new.tags.is_empty() {
        entry = entry.with_tags(new.tags.to_vec());
    }

    vault.push(entry);
    let count = vault.len();
    seal_vault(&ctx, vault, &secret)?;

    output::success(&format!(
        "Added '{}' ({count} entries in vault)",
        new.title
    ));
    Ok(())
}

/// Read the entry password from `TITANIUM_ENTRY_PASSWORD` or a hidden prompt.
pub(crate) fn prompt_entry_password(title: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(ENTRY_PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for '{title}'"))
        .interact()
        .map_err(|e| TitaniumError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
