//! Hardware-token secret adapter.
//!
//! A hardware authentication ceremony (FIDO2, TPM, ...) happens elsewhere
//! and eventually hands us an opaque token.  We hash it once with SHA-256
//! to get a fixed 32-byte secret, which is then fed to Argon2id exactly
//! like a password would be.
//!
//! The hash is fast, so a low-entropy token gets no stretching beyond
//! what the KDF applies afterwards.

use std::fs;
use std::path::Path;

use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::errors::{Result, TitaniumError};

/// Length of the secret produced from a hardware token (SHA-256).
pub const HARDWARE_SECRET_LEN: usize = 32;

/// Largest token file we are willing to read (64 KiB).
const MAX_TOKEN_LEN: u64 = 64 * 1024;

/// Hash an opaque hardware token into a 32-byte KDF secret.
pub fn derive_secret_from_hardware_token(token: &[u8]) -> Zeroizing<[u8; HARDWARE_SECRET_LEN]> {
    let mut hasher = Sha256::new();
    hasher.update(token);

    let mut secret = Zeroizing::new([0u8; HARDWARE_SECRET_LEN]);
    hasher.finalize_into(GenericArray::from_mut_slice(&mut secret[..]));
    secret
}

/// Load an opaque hardware token from a file.
///
/// The token must be non-empty and at most 64 KiB.
pub fn load_hardware_token(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    if !path.exists() {
        return Err(TitaniumError::HardwareToken(format!(
            "token file not found at {}",
            path.display()
        )));
    }

    let len = fs::metadata(path)
        .map_err(|e| TitaniumError::HardwareToken(format!("cannot stat token file: {e}")))?
        .len();
    if len == 0 || len > MAX_TOKEN_LEN {
        return Err(TitaniumError::HardwareToken(format!(
            "token file must be between 1 and {MAX_TOKEN_LEN} bytes, got {len}"
        )));
    }

    let data = fs::read(path)
        .map_err(|e| TitaniumError::HardwareToken(format!("failed to read token file: {e}")))?;

    Ok(Zeroizing::new(data))
}
