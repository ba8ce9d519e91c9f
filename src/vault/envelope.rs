//! The persisted / exported vault envelope.
//!
//! An envelope is a small JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "salt": "<64 hex chars>",
//!   "iv":   "<24 hex chars>",
//!   "data": "<hex ciphertext || 16-byte tag>",
//!   "keyDerivationInfo": { "type": "argon2id", "iterations": 10, "memory": 131072, "parallelism": 4 }
//! }
//! ```
//!
//! Fields are serialized in exactly this order.  The binary fields stay as
//! hex strings in memory; they are only decoded (and length-checked) when
//! the envelope is opened.

use serde::{Deserialize, Serialize};

use crate::crypto::{KdfParams, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{Result, TitaniumError};

/// Current envelope format version.
pub const CURRENT_VERSION: u32 = 1;

/// KDF parameters as recorded in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationInfo {
    /// Algorithm identifier, e.g. `"argon2id"`.
    #[serde(rename = "type")]
    pub algorithm: String,
    /// Time cost.
    pub iterations: u32,
    /// Memory cost in KiB.
    pub memory: u32,
    pub parallelism: u32,
}

impl KeyDerivationInfo {
    pub fn new(algorithm: &str, params: &KdfParams) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            iterations: params.time_cost,
            memory: params.memory_kib,
            parallelism: params.parallelism,
        }
    }

    /// The cost parameters in crypto-layer form.
    pub fn params(&self) -> KdfParams {
        KdfParams {
            time_cost: self.iterations,
            memory_kib: self.memory,
            parallelism: self.parallelism,
        }
    }
}

/// A versioned, self-describing encrypted vault.
///
/// Produced by `VaultCodec::encrypt`; never mutated by decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,

    /// Hex-encoded 32-byte KDF salt.
    pub salt: String,

    /// Hex-encoded 12-byte AES-GCM nonce.
    #[serde(rename = "iv")]
    pub nonce: String,

    /// Hex-encoded `ciphertext || tag`.
    #[serde(rename = "data")]
    pub ciphertext: String,

    #[serde(rename = "keyDerivationInfo")]
    pub kdf: KeyDerivationInfo,
}

/// Only used to read the version before committing to a layout.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// The binary fields of a version-1 envelope, decoded and length-checked.
pub(crate) struct DecodedEnvelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub sealed: Vec<u8>,
    pub params: KdfParams,
}

impl Envelope {
    /// Assemble a version-1 envelope from raw parts.
    pub fn new(
        salt: &[u8; SALT_LEN],
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
        kdf: KeyDerivationInfo,
    ) -> Self {
        Self {
            version: CURRENT_VERSION,
            salt: hex::encode(salt),
            nonce: hex::encode(nonce),
            ciphertext: hex::encode(sealed),
            kdf,
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TitaniumError::Encoding(format!("envelope JSON: {e}")))
    }

    /// Parse an envelope from JSON.
    ///
    /// The version is read first, so a newer format is reported as
    /// `UnsupportedVersion` even when the rest of its layout is unknown.
    pub fn from_json(json: &str) -> Result<Self> {
        let header: VersionHeader = serde_json::from_str(json)
            .map_err(|e| TitaniumError::Encoding(format!("envelope JSON: {e}")))?;
        check_version(header.version)?;

        serde_json::from_str(json)
            .map_err(|e| TitaniumError::Encoding(format!("envelope JSON: {e}")))
    }

    /// Check the version and every encoded field without decrypting.
    pub fn validate(&self) -> Result<()> {
        self.decode().map(|_| ())
    }

    /// The KDF parameters recorded in this envelope.
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf.params()
    }

    pub(crate) fn decode(&self) -> Result<DecodedEnvelope> {
        check_version(self.version)?;

        let salt = decode_fixed::<SALT_LEN>("salt", &self.salt)?;
        let nonce = decode_fixed::<NONCE_LEN>("iv", &self.nonce)?;
        let sealed = hex::decode(&self.ciphertext)
            .map_err(|e| TitaniumError::Encoding(format!("data: {e}")))?;
        if sealed.len() < TAG_LEN {
            return Err(TitaniumError::Encoding(format!(
                "data: expected at least {TAG_LEN} bytes, got {}",
                sealed.len()
            )));
        }

        Ok(DecodedEnvelope {
            salt,
            nonce,
            sealed,
            params: self.kdf.params(),
        })
    }
}

/// Only version 1 is defined.  New formats get a new arm here; shipped
/// arms are never removed.
fn check_version(version: u32) -> Result<()> {
    match version {
        CURRENT_VERSION => Ok(()),
        other => Err(TitaniumError::UnsupportedVersion(other)),
    }
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N]> {
    if value.len() != N * 2 {
        return Err(TitaniumError::Encoding(format!(
            "{field}: expected {} hex chars, got {}",
            N * 2,
            value.len()
        )));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(value, &mut out)
        .map_err(|e| TitaniumError::Encoding(format!("{field}: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ARGON2ID;

    fn sample() -> Envelope {
        Envelope::new(
            &[0x11; SALT_LEN],
            &[0x22; NONCE_LEN],
            &[0x33; TAG_LEN + 4],
            KeyDerivationInfo::new(ARGON2ID, &KdfParams::default()),
        )
    }

    #[test]
    fn json_has_legacy_field_names_in_order() {
        let json = sample().to_json().unwrap();
        let expected = format!(
            r#"{{"version":1,"salt":"{}","iv":"{}","data":"{}","keyDerivationInfo":{{"type":"argon2id","iterations":10,"memory":131072,"parallelism":4}}}}"#,
            "11".repeat(SALT_LEN),
            "22".repeat(NONCE_LEN),
            "33".repeat(TAG_LEN + 4),
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn from_json_reads_back_what_to_json_wrote() {
        let env = sample();
        let parsed = Envelope::from_json(&env.to_json().unwrap()).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn from_json_reports_unknown_version_before_layout() {
        let json = r#"{"version":2,"payload":"whatever"}"#;
        let err = Envelope::from_json(json).unwrap_err();
        assert!(matches!(err, TitaniumError::UnsupportedVersion(2)));
    }

    #[test]
    fn from_json_rejects_garbage_as_encoding() {
        let err = Envelope::from_json("not json").unwrap_err();
        assert!(matches!(err, TitaniumError::Encoding(_)));
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_short_salt() {
        let mut env = sample();
        env.salt = "ab".repeat(16);
        assert!(matches!(
            env.validate().unwrap_err(),
            TitaniumError::Encoding(_)
        ));
    }

    #[test]
    fn validate_rejects_non_hex_nonce() {
        let mut env = sample();
        env.nonce = "zz".repeat(NONCE_LEN);
        assert!(matches!(
            env.validate().unwrap_err(),
            TitaniumError::Encoding(_)
        ));
    }

    #[test]
    fn validate_rejects_data_shorter_than_tag() {
        let mut env = sample();
        env.ciphertext = "00".repeat(TAG_LEN - 1);
        assert!(matches!(
            env.validate().unwrap_err(),
            TitaniumError::Encoding(_)
        ));
    }

    #[test]
    fn validate_rejects_odd_length_data() {
        let mut env = sample();
        env.ciphertext.push('a');
        assert!(matches!(
            env.validate().unwrap_err(),
            TitaniumError::Encoding(_)
        ));
    }

    #[test]
    fn kdf_params_roundtrip_through_info() {
        let params = KdfParams {
            time_cost: 3,
            memory_kib: 65_536,
            parallelism: 2,
        };
        let info = KeyDerivationInfo::new(ARGON2ID, &params);
        assert_eq!(info.params(), params);
    }
}
