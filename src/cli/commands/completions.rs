//! `titanium completions` — generate shell completion scripts.
//!
//! Usage:
//!   titanium completions bash > ~/.local/share/bash-completion/completions/titanium
//!   titanium completions zsh > ~/.zfunc/_titanium

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_completions(shell, &mut io::stdout())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "titanium", out);
    Ok(())
}
