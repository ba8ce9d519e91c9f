//! `titanium edit` — change fields of an existing entry.
//!
//! Only the fields given on the command line change.  The vault is
//! re-encrypted with a fresh salt and nonce.

use crate::cli::commands::add::prompt_entry_password;
use crate::cli::output;
use crate::cli::{find_entry, open_vault, seal_vault, unlock_secret, vault_context, Cli};
use crate::errors::{Result, TitaniumError};
use crate::vault::VaultEntry;

/// Field changes requested on the command line.
#[derive(Default)]
pub struct EntryChanges<'a> {
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: &'a [String],
    pub password: bool,
}

impl EntryChanges<'_> {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.url.is_none()
            && self.notes.is_none()
            && self.category.is_none()
            && self.tags.is_empty()
            && !self.password
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id_or_title: &str, changes: EntryChanges<'_>) -> Result<()> {
    if changes.is_empty() {
        return Err(TitaniumError::CommandFailed(
            "nothing to change; pass at least one field (see `titanium edit --help`)".into(),
        ));
    }

    let ctx = vault_context(cli)?;
    let secret = unlock_secret(cli)?;
    let mut vault = open_vault(&ctx, &secret)?;

    let idx = find_entry(&vault, id_or_title)?;
    let new_password = if changes.password {
        Some(prompt_entry_password(&vault[idx].title)?)
    } else {
        None
    };

    let entry = &mut vault[idx];
    apply_changes(entry, &changes);
    if let Some(password) = new_password {
        entry.set_password(password.as_str());
    }
    let title = entry.title.clone();

    seal_vault(&ctx, vault, &secret)?;

    output::success(&format!("Updated entry '{title}'"));
    Ok(())
}

/// Apply every non-password change and bump `updated_at`.
fn apply_changes(entry: &mut VaultEntry, changes: &EntryChanges<'_>) {
    if let Some(title) = changes.title {
        entry.title = title.to_string();
    }
    if let Some(username) = changes.username {
        entry.username = username.to_string();
    }
    if let Some(url) = changes.url {
        entry.url = url.to_string();
    }
    if let Some(notes) = changes.notes {
        entry.notes = Some(notes.to_string()).filter(|n| !n.is_empty());
    }
    if let Some(category) = changes.category {
        entry.category = Some(category.to_string()).filter(|c| !c.is_empty());
    }
    if !changes.tags.is_empty() {
        entry.tags = Some(changes.tags.to_vec());
    }
    entry.touch();
}
