//! AES-256-GCM authenticated encryption.
//!
//! The nonce is supplied by the caller (it travels in the envelope's `iv`
//! field), and the output keeps the conventional GCM layout:
//!
//! ```text
//! [ ciphertext | 16-byte auth tag ]
//! ```
//!
//! No associated data is used.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::{Zeroize, Zeroizing};

use super::keys::DerivedKey;
use crate::errors::{Result, TitaniumError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// An AEAD cipher keyed with a 256-bit derived key.
pub trait AeadCipher: Send + Sync {
    /// Encrypt and authenticate `plaintext`, returning `ciphertext || tag`.
    fn seal(&self, key: &DerivedKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8])
        -> Result<Vec<u8>>;

    /// Verify the trailing tag and only then return the plaintext.
    ///
    /// Any verification failure is `TitaniumError::Authentication`.
    fn open(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// AES-256-GCM backed by the `aes-gcm` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmCipher;

impl AeadCipher for Aes256GcmCipher {
    fn seal(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| TitaniumError::EncryptionFailed(format!("invalid key length: {e}")))?;

        let mut buffer = Vec::with_capacity(plaintext.len() + TAG_LEN);
        buffer.extend_from_slice(plaintext);

        let tag = match cipher.encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        {
            Ok(tag) => tag,
            Err(e) => {
                // The buffer still holds plaintext.
                buffer.zeroize();
                return Err(TitaniumError::EncryptionFailed(format!(
                    "encryption error: {e}"
                )));
            }
        };

        buffer.extend_from_slice(&tag);
        Ok(buffer)
    }

    fn open(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        if sealed.len() < TAG_LEN {
            return Err(TitaniumError::Authentication);
        }

        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| TitaniumError::Authentication)?;

        let mut buffer = Zeroizing::new(ciphertext.to_vec());
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(nonce),
                b"",
                &mut buffer[..],
                Tag::from_slice(tag),
            )
            .map_err(|_| TitaniumError::Authentication)?;

        Ok(buffer)
    }
}

/// Generate a cryptographically random 12-byte nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| TitaniumError::EncryptionFailed(format!("OS random source failed: {e}")))?;
    Ok(nonce)
}
