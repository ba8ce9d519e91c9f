//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::DateTime;
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::VaultEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Format a millisecond timestamp for display.
pub fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Print a table of entries (Title, Username, URL, Category, Updated).
///
/// Passwords are never shown here.
pub fn print_entries_table(entries: &[VaultEntry]) {
    if entries.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `titanium add <TITLE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Username", "URL", "Category", "Updated"]);

    for e in entries {
        table.add_row(vec![
            e.title.clone(),
            e.username.clone(),
            e.url.clone(),
            e.category.clone().unwrap_or_default(),
            format_millis(e.updated_at),
        ]);
    }

    println!("{table}");
}

/// Print every field of one entry except its password.
pub fn print_entry_details(entry: &VaultEntry) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["Id".to_string(), entry.id.clone()]);
    table.add_row(vec!["Title".to_string(), entry.title.clone()]);
    table.add_row(vec!["Username".to_string(), entry.username.clone()]);
    table.add_row(vec!["URL".to_string(), entry.url.clone()]);
    if let Some(category) = &entry.category {
        table.add_row(vec!["Category".to_string(), category.clone()]);
    }
    if let Some(tags) = &entry.tags {
        table.add_row(vec!["Tags".to_string(), tags.join(", ")]);
    }
    if let Some(notes) = &entry.notes {
        table.add_row(vec!["Notes".to_string(), notes.clone()]);
    }
    table.add_row(vec!["Created".to_string(), format_millis(entry.created_at)]);
    table.add_row(vec!["Updated".to_string(), format_millis(entry.updated_at)]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_millis_renders_utc() {
        assert_eq!(format_millis(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn format_millis_out_of_range_is_dash() {
        assert_eq!(format_millis(i64::MAX), "-");
    }
}
