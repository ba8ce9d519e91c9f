//! Envelope codec: vault + secret <-> envelope.
//!
//! `encrypt` serializes the entries to JSON, derives a key from the secret
//! under a fresh salt, seals the JSON under a fresh nonce and records
//! everything needed to reverse it.  `decrypt` checks the version, derives
//! the key with the *envelope's* parameters, verifies the tag and only then
//! parses the plaintext.
//!
//! Early version-1 vaults were sealed with a key taken from the tail of
//! the encoded Argon2id hash rather than the raw hash.  When the raw key
//! fails the tag check, `decrypt` tries that form once, computed from the
//! same KDF output.  Either way a failure is the same `Authentication`.
//!
//! Derived keys and plaintext buffers are wiped on every exit path.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::entry::{Vault, VaultEntry};
use super::envelope::{DecodedEnvelope, Envelope, KeyDerivationInfo};
use crate::crypto::{
    generate_nonce, generate_salt, legacy_encoded_key, AeadCipher, Aes256GcmCipher, Argon2id,
    DerivedKey, KdfParams, KeyDerivation,
};
use crate::errors::{Result, TitaniumError};

/// Turns vaults into envelopes and back.
///
/// Generic over the two primitives so either can be swapped without
/// touching this logic.  Holds no state beyond its configuration, so one
/// codec can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct VaultCodec<K = Argon2id, C = Aes256GcmCipher> {
    kdf: K,
    cipher: C,
    params: KdfParams,
}

impl VaultCodec {
    /// Argon2id + AES-256-GCM, encrypting new vaults with `params`.
    pub fn new(params: KdfParams) -> Self {
        Self::with_primitives(Argon2id, Aes256GcmCipher, params)
    }
}

impl Default for VaultCodec {
    fn default() -> Self {
        Self::new(KdfParams::default())
    }
}

impl<K: KeyDerivation, C: AeadCipher> VaultCodec<K, C> {
    /// Build a codec from explicit primitives.
    pub fn with_primitives(kdf: K, cipher: C, params: KdfParams) -> Self {
        Self {
            kdf,
            cipher,
            params,
        }
    }

    /// The parameters used for newly encrypted vaults.
    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Encrypt `vault` under `secret`.
    ///
    /// Every call draws a new salt and nonce, so encrypting the same vault
    /// twice never yields the same envelope.
    pub fn encrypt(&self, vault: &[VaultEntry], secret: &[u8]) -> Result<Envelope> {
        self.params.validate()?;

        let salt = generate_salt()?;
        let nonce = generate_nonce()?;

        let plaintext = Zeroizing::new(serde_json::to_vec(vault).map_err(|e| {
            TitaniumError::EncryptionFailed(format!("cannot serialize vault: {e}"))
        })?);

        debug!(
            algorithm = self.kdf.algorithm(),
            iterations = self.params.time_cost,
            memory_kib = self.params.memory_kib,
            parallelism = self.params.parallelism,
            "deriving vault key"
        );
        let key = self.kdf.derive(secret, &salt, &self.params)?;
        let sealed = self.cipher.seal(&key, &nonce, &plaintext);
        drop(key);
        let sealed = sealed?;

        info!(
            entries = vault.len(),
            bytes = sealed.len(),
            "vault encrypted"
        );

        Ok(Envelope::new(
            &salt,
            &nonce,
            &sealed,
            KeyDerivationInfo::new(self.kdf.algorithm(), &self.params),
        ))
    }

    /// Decrypt `envelope` with `secret`.
    ///
    /// A wrong secret and a tampered envelope both fail with the same
    /// `TitaniumError::Authentication`.
    pub fn decrypt(&self, envelope: &Envelope, secret: &[u8]) -> Result<Vault> {
        // Version is checked first, inside decode.
        let decoded = envelope.decode()?;

        if envelope.kdf.algorithm != self.kdf.algorithm() {
            return Err(TitaniumError::KeyDerivation(format!(
                "unsupported key derivation algorithm '{}'",
                envelope.kdf.algorithm
            )));
        }

        debug!(
            algorithm = %envelope.kdf.algorithm,
            iterations = decoded.params.time_cost,
            memory_kib = decoded.params.memory_kib,
            parallelism = decoded.params.parallelism,
            "deriving vault key from envelope parameters"
        );
        let key = self.kdf.derive(secret, &decoded.salt, &decoded.params)?;
        let opened = match self.cipher.open(&key, &decoded.nonce, &decoded.sealed) {
            Err(TitaniumError::Authentication) => self.open_legacy(&key, &decoded),
            other => other,
        };
        drop(key);

        let plaintext = match opened {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!("vault authentication failed");
                return Err(e);
            }
        };

        // serde_json messages can quote the input, so only the position is kept.
        let vault: Vault = serde_json::from_slice(&plaintext).map_err(|e| {
            TitaniumError::Format(format!(
                "vault is not a valid entry list (line {}, column {})",
                e.line(),
                e.column()
            ))
        })?;

        info!(entries = vault.len(), "vault decrypted");
        Ok(vault)
    }
}

impl<K: KeyDerivation, C: AeadCipher> VaultCodec<K, C> {
    /// Second attempt for version-1 vaults sealed with the encoded-hash key.
    ///
    /// Any failure here is reported as `Authentication`, the same as the
    /// first attempt.
    fn open_legacy(
        &self,
        key: &DerivedKey,
        decoded: &DecodedEnvelope,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let legacy = legacy_encoded_key(key).map_err(|_| TitaniumError::Authentication)?;
        let opened = self.cipher.open(&legacy, &decoded.nonce, &decoded.sealed);
        drop(legacy);

        if opened.is_ok() {
            debug!("vault opened with legacy encoded-hash key");
        }
        opened.map_err(|_| TitaniumError::Authentication)
    }
}

/// Encrypt with the default Argon2id + AES-256-GCM codec and default costs.
pub fn encrypt_vault(vault: &[VaultEntry], secret: &[u8]) -> Result<Envelope> {
    VaultCodec::default().encrypt(vault, secret)
}

/// Decrypt with the default codec.  Costs always come from the envelope.
pub fn decrypt_vault(envelope: &Envelope, secret: &[u8]) -> Result<Vault> {
    VaultCodec::default().decrypt(envelope, secret)
}
