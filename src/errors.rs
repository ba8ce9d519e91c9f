use std::path::PathBuf;
use thiserror::Error;

/// Message shown for every authentication failure.
///
/// A wrong password and tampered ciphertext must look the same to the
/// caller, so this is the only text an `Authentication` error ever carries.
pub const AUTHENTICATION_FAILED_MSG: &str = "incorrect password or corrupted data";

/// All errors that can occur in Titanium.
#[derive(Debug, Error)]
pub enum TitaniumError {
    // --- Engine errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Unsupported vault format version {0}")]
    UnsupportedVersion(u32),

    #[error("Decryption failed: {AUTHENTICATION_FAILED_MSG}")]
    Authentication,

    #[error("Invalid vault contents: {0}")]
    Format(String),

    #[error("Malformed envelope: {0}")]
    Encoding(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Storage errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Secret source errors ---
    #[error("Hardware token error: {0}")]
    HardwareToken(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Coarse error category, for callers that branch on the kind of failure
/// rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    KeyDerivation,
    UnsupportedVersion,
    Authentication,
    Format,
    Encoding,
    /// Sealing side only: no random bytes from the OS, or the vault could
    /// not be serialized.  Decryption never reports this kind.
    Encryption,
    Other,
}

impl TitaniumError {
    /// The engine taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyDerivation(_) => ErrorKind::KeyDerivation,
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::Authentication => ErrorKind::Authentication,
            Self::Format(_) => ErrorKind::Format,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::EncryptionFailed(_) => ErrorKind::Encryption,
            _ => ErrorKind::Other,
        }
    }
}

/// Convenience type alias for Titanium results.
pub type Result<T> = std::result::Result<T, TitaniumError>;
