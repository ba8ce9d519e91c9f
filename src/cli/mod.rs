//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, TitaniumError};
use crate::secret_source::{HardwareToken, Passphrase, SecretSource};
use crate::storage::{EnvelopeStore, FileEnvelopeStore};
use crate::vault::{spawn_decrypt, spawn_encrypt, Envelope, Vault, VaultCodec, VaultEntry};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable holding the vault password (CI / scripting).
pub const PASSWORD_ENV: &str = "TITANIUM_PASSWORD";

/// Environment variable holding the new password for `rotate-password`.
pub const NEW_PASSWORD_ENV: &str = "TITANIUM_NEW_PASSWORD";

/// Titanium CLI: encrypted password vault.
#[derive(Parser)]
#[command(name = "titanium", about = "Encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: from .titanium.toml, else .titanium)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Unlock with a hardware token file instead of a password
    #[arg(long, global = true)]
    pub hardware_token: Option<String>,

    /// Enable debug logging (overridden by TITANIUM_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add a credential entry
    Add {
        /// Entry title (e.g. Gmail)
        title: String,
        /// Account username
        #[arg(short, long, default_value = "")]
        username: String,
        /// Site URL
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Category (e.g. Email, Banking)
        #[arg(long)]
        category: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List entries
    List {
        /// Only show entries whose title, username, URL, category or tags
        /// contain this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print an entry's password
    Get {
        /// Entry id or title
        entry: String,
        /// Show all fields except the password instead
        #[arg(long)]
        details: bool,
        /// Copy the password to the clipboard instead of printing it
        #[arg(short, long, conflicts_with = "copy_username")]
        copy: bool,
        /// Copy the username to the clipboard
        #[arg(long)]
        copy_username: bool,
    },

    /// Change fields of an existing entry
    Edit {
        /// Entry id or title
        entry: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// Replace the tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Also set a new password (prompted, or TITANIUM_ENTRY_PASSWORD)
        #[arg(short, long)]
        password: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id or title
        entry: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the master password (re-encrypts with current KDF settings)
    RotatePassword {
        /// Switch to a hardware token file instead of a new password
        #[arg(long)]
        new_hardware_token: Option<String>,
    },

    /// Export the encrypted vault to a file
    Export {
        /// Destination file
        output: String,
    },

    /// Import an encrypted vault file, replacing the current vault
    Import {
        /// Path to the exported vault
        file: String,
        /// Decrypt the file before importing to check the secret opens it
        #[arg(long)]
        verify: bool,
        /// Replace an existing vault without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs to reach the vault.
pub struct VaultContext {
    pub store: FileEnvelopeStore,
    pub codec: Arc<VaultCodec>,
}

/// Load settings from the working directory and resolve the vault path.
pub fn vault_context(cli: &Cli) -> Result<VaultContext> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir = dir.clone();
    }

    let store = FileEnvelopeStore::new(settings.vault_path(&cwd));
    let codec = Arc::new(VaultCodec::new(settings.kdf_params()));

    Ok(VaultContext { store, codec })
}

/// Get the vault password, trying in order:
/// 1. `TITANIUM_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| TitaniumError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation.
///
/// `env_var` is checked first for scripted use.  Enforces a minimum
/// password length.
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(TitaniumError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| TitaniumError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// The secret that unlocks an existing vault: hardware token if
/// `--hardware-token` was given, otherwise the master password.
pub fn unlock_secret(cli: &Cli) -> Result<Zeroizing<Vec<u8>>> {
    match &cli.hardware_token {
        Some(path) => HardwareToken::from_file(Path::new(path))?.secret(),
        None => Passphrase::new(prompt_password()?).secret(),
    }
}

/// The secret for a brand-new vault: hardware token, or a new password
/// read from `env_var` / an interactive prompt.
pub fn new_secret(hardware_token: Option<&str>, env_var: &str) -> Result<Zeroizing<Vec<u8>>> {
    match hardware_token {
        Some(path) => HardwareToken::from_file(Path::new(path))?.secret(),
        None => Passphrase::new(prompt_new_password(env_var)?).secret(),
    }
}

/// Decrypt an envelope on a worker thread and wait for it.
pub fn decrypt_envelope(
    ctx: &VaultContext,
    envelope: Envelope,
    secret: &Zeroizing<Vec<u8>>,
) -> Result<Vault> {
    spawn_decrypt(Arc::clone(&ctx.codec), envelope, secret.clone())?.wait()
}

/// Load and decrypt the stored vault.
pub fn open_vault(ctx: &VaultContext, secret: &Zeroizing<Vec<u8>>) -> Result<Vault> {
    let envelope = ctx.store.load_existing()?;
    decrypt_envelope(ctx, envelope, secret)
}

/// Encrypt `vault` on a worker thread and persist the new envelope.
pub fn seal_vault(
    ctx: &VaultContext,
    vault: Vec<VaultEntry>,
    secret: &Zeroizing<Vec<u8>>,
) -> Result<()> {
    let envelope = spawn_encrypt(Arc::clone(&ctx.codec), vault, secret.clone())?.wait()?;
    ctx.store.save(&envelope)
}

/// Find the index of the entry with this id, or else the unique entry
/// with this (case-insensitive) title.
pub fn find_entry(vault: &[VaultEntry], id_or_title: &str) -> Result<usize> {
    if let Some(idx) = vault.iter().position(|e| e.id == id_or_title) {
        return Ok(idx);
    }

    let mut matches = vault
        .iter()
        .enumerate()
        .filter(|(_, e)| e.matches(id_or_title))
        .map(|(idx, _)| idx);

    match (matches.next(), matches.next()) {
        (Some(idx), None) => Ok(idx),
        (Some(_), Some(_)) => Err(TitaniumError::CommandFailed(format!(
            "several entries are titled '{id_or_title}'; use the entry id instead"
        ))),
        (None, _) => Err(TitaniumError::EntryNotFound(id_or_title.to_string())),
    }
}
