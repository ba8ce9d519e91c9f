//! `titanium get` — print a single entry's password (or its details),
//! or copy the password or username to the clipboard.

use crate::cli::output;
use crate::cli::{find_entry, open_vault, unlock_secret, vault_context, Cli};
use crate::errors::{Result, TitaniumError};

/// What `get` does with the entry it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetAction {
    PrintPassword,
    Details,
    CopyPassword,
    CopyUsername,
}

impl GetAction {
    /// Resolve the command-line flags.  Copying wins over `--details`.
    pub fn from_flags(details: bool, copy: bool, copy_username: bool) -> Self {
        match (copy, copy_username, details) {
            (true, _, _) => Self::CopyPassword,
            (_, true, _) => Self::CopyUsername,
            (_, _, true) => Self::Details,
            _ => Self::PrintPassword,
        }
    }
}

/// Execute the `get` command.
pub fn execute(cli: &Cli, id_or_title: &str, action: GetAction) -> Result<()> {
    let ctx = vault_context(cli)?;
    let secret = unlock_secret(cli)?;
    let vault = open_vault(&ctx, &secret)?;

    let entry = &vault[find_entry(&vault, id_or_title)?];

    match action {
        GetAction::PrintPassword => println!("{}", entry.password),
        GetAction::Details => output::print_entry_details(entry),
        GetAction::CopyPassword => {
            copy_to_clipboard(&entry.password)?;
            output::success(&format!("Password for '{}' copied to clipboard", entry.title));
            output::tip("Clear your clipboard once you have pasted it.");
        }
        GetAction::CopyUsername => {
            copy_to_clipboard(&entry.username)?;
            output::success(&format!("Username for '{}' copied to clipboard", entry.title));
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| TitaniumError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| TitaniumError::CommandFailed(format!("failed to copy to clipboard: {e}")))
}
