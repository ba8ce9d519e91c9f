//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The cost parameters are stored in every envelope,
//! so the defaults here only apply to newly encrypted vaults.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{Result, TitaniumError};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Algorithm identifier written to `keyDerivationInfo.type`.
pub const ARGON2ID: &str = "argon2id";

/// Minimum memory cost in KiB (8 MB).
pub const MIN_MEMORY_KIB: u32 = 8_192;

/// Maximum memory cost in KiB (4 GB).
pub const MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;

/// Maximum iteration count.
pub const MAX_ITERATIONS: u32 = 64;

/// Maximum number of lanes.
pub const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Number of passes over memory (default: 10).
    pub time_cost: u32,
    /// Memory cost in KiB (default: 131 072 = 128 MB).
    pub memory_kib: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            time_cost: 10,
            memory_kib: 131_072,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Reject parameters outside the supported range.
    ///
    /// Runs on both encrypt and decrypt, so a crafted envelope cannot ask
    /// for unbounded memory or time.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ITERATIONS).contains(&self.time_cost) {
            return Err(TitaniumError::KeyDerivation(format!(
                "iterations must be between 1 and {MAX_ITERATIONS} (got {})",
                self.time_cost
            )));
        }
        if !(1..=MAX_PARALLELISM).contains(&self.parallelism) {
            return Err(TitaniumError::KeyDerivation(format!(
                "parallelism must be between 1 and {MAX_PARALLELISM} (got {})",
                self.parallelism
            )));
        }
        if !(MIN_MEMORY_KIB..=MAX_MEMORY_KIB).contains(&self.memory_kib) {
            return Err(TitaniumError::KeyDerivation(format!(
                "memory must be between {MIN_MEMORY_KIB} and {MAX_MEMORY_KIB} KiB (got {})",
                self.memory_kib
            )));
        }
        if self.memory_kib < 8 * self.parallelism {
            return Err(TitaniumError::KeyDerivation(format!(
                "memory must be at least 8 KiB per lane ({} lanes)",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// A memory-hard key derivation function.
///
/// The envelope codec only talks to this trait, so the concrete primitive
/// can be replaced without touching the envelope logic.
pub trait KeyDerivation: Send + Sync {
    /// Identifier stored in the envelope (e.g. `"argon2id"`).
    fn algorithm(&self) -> &'static str;

    /// Derive a 32-byte key.  Must be deterministic in all three inputs.
    fn derive(&self, secret: &[u8], salt: &[u8; SALT_LEN], params: &KdfParams)
        -> Result<DerivedKey>;
}

/// Argon2id (version 0x13) backed by the `argon2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2id;

impl KeyDerivation for Argon2id {
    fn algorithm(&self) -> &'static str {
        ARGON2ID
    }

    fn derive(
        &self,
        secret: &[u8],
        salt: &[u8; SALT_LEN],
        params: &KdfParams,
    ) -> Result<DerivedKey> {
        params.validate()?;

        let argon2_params = Params::new(
            params.memory_kib,
            params.time_cost,
            params.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| TitaniumError::KeyDerivation(format!("invalid Argon2 params: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

        // Filled in place; dropping it on the error path wipes any partial output.
        let mut key = DerivedKey::zeroed();
        argon2
            .hash_password_into(secret, salt, key.as_mut_bytes())
            .map_err(|e| TitaniumError::KeyDerivation(format!("Argon2id hashing failed: {e}")))?;

        Ok(key)
    }
}

/// Derive a 32-byte key from a secret and salt with Argon2id.
///
/// The same secret + salt + params always produce the same key.
pub fn derive_key(secret: &[u8], salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<DerivedKey> {
    Argon2id.derive(secret, salt, params)
}

/// Unpadded base64 of a 32-byte hash, plus one spare byte.
const ENCODED_HASH_BUF: usize = 44;

/// Rebuild the key format used by early version-1 vaults.
///
/// Those vaults were sealed with the last 32 characters of the PHC string
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`) used as the AES key.
/// The tail of that string is the tail of the unpadded base64 hash, so it
/// can be computed from the raw Argon2id output without running the KDF
/// again.
pub fn legacy_encoded_key(raw: &DerivedKey) -> Result<DerivedKey> {
    let mut encoded = Zeroizing::new([0u8; ENCODED_HASH_BUF]);
    let written = STANDARD_NO_PAD
        .encode_slice(raw.as_bytes(), &mut encoded[..])
        .map_err(|e| TitaniumError::KeyDerivation(format!("cannot encode hash: {e}")))?;

    let mut key = DerivedKey::zeroed();
    key.as_mut_bytes()
        .copy_from_slice(&encoded[written - KEY_LEN..written]);
    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| TitaniumError::EncryptionFailed(format!("OS random source failed: {e}")))?;
    Ok(salt)
}
