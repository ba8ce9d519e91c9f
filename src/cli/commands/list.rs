//! `titanium list` — display entries in a table, optionally filtered.

use crate::cli::output;
use crate::cli::{open_vault, unlock_secret, vault_context, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>) -> Result<()> {
    let ctx = vault_context(cli)?;
    let secret = unlock_secret(cli)?;
    let vault = open_vault(&ctx, &secret)?;

    let Some(query) = search else {
        output::info(&format!("{} entr(ies)", vault.len()));
        output::print_entries_table(&vault);
        return Ok(());
    };

    let matching: Vec<_> = vault
        .iter()
        .filter(|e| e.matches_query(query))
        .cloned()
        .collect();

    if matching.is_empty() {
        output::info(&format!("No entries match '{query}'."));
        return Ok(());
    }

    output::info(&format!(
        "{} of {} entr(ies) match '{query}'",
        matching.len(),
        vault.len()
    ));
    output::print_entries_table(&matching);

    Ok(())
}
