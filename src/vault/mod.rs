//! Vault module — the encryption engine.
//!
//! This module provides:
//! - `VaultEntry` credential records (`entry`)
//! - The versioned `Envelope` wire format (`envelope`)
//! - `VaultCodec` for encrypting and decrypting vaults (`codec`)
//! - Worker-thread helpers for running the codec off the caller's thread (`background`)

pub mod background;
pub mod codec;
pub mod entry;
pub mod envelope;

// Re-export the most commonly used items.
pub use background::{spawn_decrypt, spawn_encrypt, PendingOperation};
pub use codec::{decrypt_vault, encrypt_vault, VaultCodec};
pub use entry::{Vault, VaultEntry};
pub use envelope::{Envelope, KeyDerivationInfo, CURRENT_VERSION};
